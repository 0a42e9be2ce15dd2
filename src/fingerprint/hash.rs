use crate::shared::Result;
use anyhow::Context;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;
use std::path::Path;

/// sha256 of zero bytes; the sentinel recorded for unreadable files.
pub const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Files are hashed in 1 MiB blocks so multi-gigabyte weights never sit in
/// memory whole.
const HASH_BLOCK_SIZE: usize = 1024 * 1024;

/// Only the leading bytes decide text vs binary.
const SNIFF_SIZE: u64 = 1000;

pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Streaming content hash plus the byte count actually hashed.
pub fn sha256_file(path: &Path) -> Result<(String, u64)> {
    let mut file = fs::File::open(path)
        .with_context(|| format!("Failed to open {} for hashing", path.display()))?;
    let mut hasher = Sha256::new();
    let mut block = vec![0u8; HASH_BLOCK_SIZE];
    let mut size: u64 = 0;
    loop {
        let read = file
            .read(&mut block)
            .with_context(|| format!("Failed to read {} while hashing", path.display()))?;
        if read == 0 {
            break;
        }
        hasher.update(&block[..read]);
        size += read as u64;
    }
    Ok((hex::encode(hasher.finalize()), size))
}

/// Sniffs the first [`SNIFF_SIZE`] bytes: any byte outside the printable
/// set marks the file as binary. The printable set is the classic one:
/// bell/backspace/tab/newline/formfeed/carriage-return/escape plus
/// everything from 0x20 up, except DEL.
pub fn is_binary_file(path: &Path) -> Result<bool> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open {} for content sniffing", path.display()))?;
    let mut sample = Vec::with_capacity(SNIFF_SIZE as usize);
    file.take(SNIFF_SIZE)
        .read_to_end(&mut sample)
        .with_context(|| format!("Failed to sample {}", path.display()))?;
    Ok(sample.iter().any(|&b| !is_text_byte(b)))
}

fn is_text_byte(b: u8) -> bool {
    matches!(b, 7 | 8 | 9 | 10 | 12 | 13 | 27) || (b >= 0x20 && b != 0x7f)
}
