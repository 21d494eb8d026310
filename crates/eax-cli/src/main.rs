//! Command-line interface for `eax-core`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use aes_reg::{Aes128, Aes128Key};
use anyhow::{bail, ensure, Context, Result};
use clap::{Parser, Subcommand};
use eax_core::{open_in_place, seal_in_place, Eax};
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const TAG_LEN: usize = 16;

/// EAX (AES-128) CLI.
#[derive(Parser)]
#[command(name = "eaxs", version, author, about = "Byte-streamed EAX over AES-128")]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt and authenticate a file; writes ciphertext followed by the tag.
    Seal {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Nonce of any length, as hex.
        #[arg(long, value_name = "HEX")]
        nonce_hex: String,
        /// Associated header data, as hex.
        #[arg(long, value_name = "HEX", default_value = "")]
        header_hex: String,
        /// Plaintext input file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output path for ciphertext || tag.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Verify and decrypt a file produced by `seal`.
    Open {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Nonce used when sealing, as hex.
        #[arg(long, value_name = "HEX")]
        nonce_hex: String,
        /// Associated header data, as hex.
        #[arg(long, value_name = "HEX", default_value = "")]
        header_hex: String,
        /// Input file holding ciphertext || tag.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path; not written if authentication fails.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Length of the trailing tag in bytes (1..=16).
        #[arg(long, default_value_t = TAG_LEN)]
        tag_len: usize,
    },
    /// Replay a JSON file of AES-EAX test vectors through the byte-stream API.
    Check {
        /// JSON array of [key, nonce, header, plaintext, ciphertext, tag] byte arrays.
        #[arg(long, value_name = "FILE")]
        vectors: PathBuf,
    },
    /// Run a local demo: random key, nonce, header and message; seal then open.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// One test vector as stored by the vector tooling: six byte arrays.
#[derive(Debug, Deserialize)]
struct VectorCase(Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>);

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Seal {
            key_hex,
            nonce_hex,
            header_hex,
            input,
            output,
        } => cmd_seal(&key_hex, &nonce_hex, &header_hex, &input, &output),
        Commands::Open {
            key_hex,
            nonce_hex,
            header_hex,
            input,
            output,
            tag_len,
        } => cmd_open(&key_hex, &nonce_hex, &header_hex, &input, &output, tag_len),
        Commands::Check { vectors } => cmd_check(&vectors),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn cmd_seal(
    key_hex: &str,
    nonce_hex: &str,
    header_hex: &str,
    input: &Path,
    output: &Path,
) -> Result<()> {
    let aes = Aes128::new(&parse_key_hex(key_hex)?);
    let nonce = parse_hex("nonce", nonce_hex)?;
    let header = parse_hex("header", header_hex)?;
    let mut data = fs::read(input).with_context(|| format!("read {}", input.display()))?;

    let tag = seal_in_place(&aes, &nonce, &header, &mut data).context("seal")?;
    data.extend_from_slice(tag.as_bytes());
    fs::write(output, &data).with_context(|| format!("write {}", output.display()))?;
    info!(bytes = data.len() - TAG_LEN, "sealed");
    Ok(())
}

fn cmd_open(
    key_hex: &str,
    nonce_hex: &str,
    header_hex: &str,
    input: &Path,
    output: &Path,
    tag_len: usize,
) -> Result<()> {
    ensure!((1..=TAG_LEN).contains(&tag_len), "tag length must be 1..={TAG_LEN} bytes");
    let aes = Aes128::new(&parse_key_hex(key_hex)?);
    let nonce = parse_hex("nonce", nonce_hex)?;
    let header = parse_hex("header", header_hex)?;
    let mut data = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    if data.len() < tag_len {
        bail!("input is shorter than the {tag_len}-byte tag");
    }

    let tag = data.split_off(data.len() - tag_len);
    open_in_place(&aes, &nonce, &header, &mut data, &tag)
        .with_context(|| format!("open {}", input.display()))?;
    fs::write(output, &data).with_context(|| format!("write {}", output.display()))?;
    info!(bytes = data.len(), "opened");
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let json = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let count = check_vectors(&json)?;
    println!("ok: {count} vectors");
    Ok(())
}

/// Runs every vector in `json` and returns how many passed; stops at the
/// first failure.
fn check_vectors(json: &str) -> Result<usize> {
    let cases: Vec<VectorCase> = serde_json::from_str(json).context("parse vectors")?;
    for (i, case) in cases.iter().enumerate() {
        check_vector(case).with_context(|| format!("vector {i}"))?;
        debug!(index = i, "vector passed");
    }
    Ok(cases.len())
}

fn check_vector(case: &VectorCase) -> Result<()> {
    let VectorCase(key, nonce, header, pt, ct, tag) = case;
    ensure!(pt.len() == ct.len(), "plaintext and ciphertext lengths differ");
    let aes = Aes128::new(&key_from_slice(key)?);

    // Receiver order: authenticate everything, decrypt, then digest.
    let mut eax = Eax::new(&aes);
    eax.init(nonce);
    for &b in header {
        eax.auth_header(b)?;
    }
    for &b in ct {
        eax.auth_ciphertext(b)?;
    }
    for (pos, (&c, &p)) in (0u64..).zip(ct.iter().zip(pt)) {
        if eax.decrypt(pos, c)? != p {
            bail!("decrypt mismatch at byte {pos}");
        }
    }
    eax.digest()?.verify(tag).context("auth")?;
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key_bytes = [0u8; 16];
    rng.fill_bytes(&mut key_bytes);
    let aes = Aes128::new(&Aes128Key::from(key_bytes));

    let nonce = random_bytes(&mut rng, 16);
    let header = random_bytes(&mut rng, 8);
    let len = rng.gen_range(1..=64);
    let plaintext = random_bytes(&mut rng, len);

    let mut buf = plaintext.clone();
    let tag = seal_in_place(&aes, &nonce, &header, &mut buf)?;
    let ciphertext_hex = hex::encode(&buf);
    open_in_place(&aes, &nonce, &header, &mut buf, tag.as_bytes())?;

    println!("demo key: {}", hex::encode(key_bytes));
    println!("nonce: {}", hex::encode(&nonce));
    println!("header: {}", hex::encode(&header));
    println!("plaintext: {}", hex::encode(&plaintext));
    println!("ciphertext: {}", ciphertext_hex);
    println!("tag: {}", hex::encode(tag.as_bytes()));
    println!("decrypted: {}", hex::encode(&buf));
    if buf != plaintext {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<Aes128Key> {
    let bytes = parse_hex("key", hex_str)?;
    key_from_slice(&bytes)
}

fn key_from_slice(bytes: &[u8]) -> Result<Aes128Key> {
    let key: [u8; 16] = bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("AES-128 key must be 16 bytes, got {}", bytes.len()))?;
    Ok(Aes128Key::from(key))
}

fn parse_hex(what: &str, hex_str: &str) -> Result<Vec<u8>> {
    hex::decode(hex_str.trim()).with_context(|| format!("decode {what} hex"))
}

fn random_bytes(rng: &mut impl RngCore, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    rng.fill_bytes(&mut out);
    out
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}
