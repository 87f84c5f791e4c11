//! Canonical block encoding and digest.
//!
//! Blocks are encoded as JSON with keys sorted at every level, `", "` and
//! `": "` as separators, non-ASCII text escaped to `\uXXXX` and floats in
//! their shortest round-trip form (exponent notation below `1e-4` and from
//! `1e16` up, e.g. `1e-05`, `1e+16`). Nodes that agree on this byte form
//! agree on block hashes.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use sha2::{Digest, Sha256};

use super::Block;

/// Deterministic byte encoding of a block.
pub fn canonicalize(block: &Block) -> Vec<u8> {
    to_canonical_json(block)
}

/// Lowercase hex SHA-256 of [`canonicalize`].
pub fn hash(block: &Block) -> String {
    sha256_hex(&canonicalize(block))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn to_canonical_json<T: Serialize>(value: &T) -> Vec<u8> {
    // Going through `Value` sorts object keys (its map is a BTreeMap).
    let value = serde_json::to_value(value).expect("serialize block");
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, CanonicalFormatter);
    value.serialize(&mut ser).expect("write canonical json");
    out
}

struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(shortest_float(value).as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Shortest digits that round-trip `value`, laid out in fixed notation for
/// decimal exponents in `-4..16` and as `d.ddde±XX` outside it. Whole
/// numbers in fixed notation keep a trailing `.0`.
fn shortest_float(value: f64) -> String {
    let sci = format!("{value:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let mut fixed = value.to_string();
        if !fixed.contains('.') {
            fixed.push_str(".0");
        }
        fixed
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}
