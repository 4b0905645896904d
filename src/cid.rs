//! Content identifiers for dataset files.
//!
//! A dataset is addressed by its IPFS CIDv0: the base58btc encoding of a
//! sha2-256 multihash (`0x12 0x20` followed by the 32-byte digest),
//! prefixed with `/ipfs/`.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;

const SHA2_256: u8 = 0x12;
const DIGEST_LEN: u8 = 0x20;

const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// `/ipfs/Qm...` path for `bytes`.
pub fn ipfs_path(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("/ipfs/{}", encode_multihash(digest.as_slice()))
}

/// `/ipfs/Qm...` path for the contents of `path`, read in chunks.
pub fn file_ipfs_path(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let digest = hasher.finalize();
    Ok(format!("/ipfs/{}", encode_multihash(digest.as_slice())))
}

fn encode_multihash(digest: &[u8]) -> String {
    let mut multihash = Vec::with_capacity(digest.len() + 2);
    multihash.push(SHA2_256);
    multihash.push(DIGEST_LEN);
    multihash.extend_from_slice(digest);
    base58_encode(&multihash)
}

/// Bitcoin-alphabet base58.
pub fn base58_encode(input: &[u8]) -> String {
    let zeros = input.iter().take_while(|b| **b == 0).count();

    // Little-endian base58 digits of the non-zero tail.
    let mut digits: Vec<u8> = Vec::with_capacity(input.len() * 138 / 100 + 1);
    for &byte in &input[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat('1').take(zeros));
    out.extend(
        digits
            .iter()
            .rev()
            .map(|d| BASE58_ALPHABET[*d as usize] as char),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn base58_known_vectors() {
        assert_eq!(base58_encode(b""), "");
        assert_eq!(base58_encode(&[0x61]), "2g");
        assert_eq!(base58_encode(b"bbb"), "a3gV");
        assert_eq!(base58_encode(b"ccc"), "aPEr");
        assert_eq!(base58_encode(b"hello world"), "StV1DL6CwTryKyV");
    }

    #[test]
    fn base58_keeps_leading_zeros() {
        assert_eq!(base58_encode(&[0, 0, 0x61]), "112g");
        assert_eq!(base58_encode(&[0]), "1");
    }

    #[test]
    fn ipfs_path_shape() {
        let path = ipfs_path(b"dataset rows");
        let cid = path.strip_prefix("/ipfs/").unwrap();
        assert!(cid.starts_with("Qm"));
        assert_eq!(cid.len(), 46);
    }

    #[test]
    fn ipfs_path_depends_on_content() {
        assert_ne!(ipfs_path(b"a"), ipfs_path(b"b"));
        assert_eq!(ipfs_path(b"a"), ipfs_path(b"a"));
    }

    #[test]
    fn file_path_matches_in_memory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("data.csv");
        let content = "id,value\n".repeat(20_000);
        std::fs::write(&file, &content).unwrap();

        assert_eq!(file_ipfs_path(&file).unwrap(), ipfs_path(content.as_bytes()));
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = file_ipfs_path(&temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, crate::error::OrdertrackError::Io(_)));
    }
}
