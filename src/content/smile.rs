/*
 * Copyright 2016-2019 Ben Ashford
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Smile, the binary JSON-equivalent format the cluster accepts as
//! `application/smile`.
//!
//! Only the part of the format that maps onto `serde_json::Value` is
//! supported: raw binary values are rejected.  Numbers keep their exact
//! text, so integers beyond 64 bits travel as big integers and decimals a
//! double cannot hold exactly travel as big decimals.  The writer never
//! emits shared name or value back-references, the reader understands both.

use serde_json::{Map, Number, Value};

use crate::error::EsError;

const HEADER: [u8; 3] = [b':', b')', b'\n'];

const FLAG_SHARED_NAMES: u8 = 0x01;
const FLAG_SHARED_VALUES: u8 = 0x02;

/// Ends a document inside a stream of documents
pub const END_OF_CONTENT: u8 = 0xFF;

const END_OF_STRING: u8 = 0xFC;

const MAX_SHARED_ENTRIES: usize = 1024;
const MAX_SHARED_NAME_BYTES: usize = 64;

/// Deepest nesting of arrays and objects the reader accepts
const MAX_DEPTH: usize = 128;

/// Longest big integer, in bytes, the reader accepts
const MAX_BIG_INTEGER_BYTES: usize = 1024;

/// Encode `value` as a complete Smile document, header included
pub fn to_vec(value: &Value) -> Result<Vec<u8>, EsError> {
    let mut out = Vec::with_capacity(64);
    out.extend_from_slice(&HEADER);
    out.push(0x00);
    write_value(&mut out, value)?;
    Ok(out)
}

/// Decode one complete Smile document.  A single trailing end-of-content
/// marker is accepted.
pub fn from_slice(input: &[u8]) -> Result<Value, EsError> {
    let mut reader = Reader::new(input)?;
    let value = reader.read_value()?;
    reader.finish()?;
    Ok(value)
}

fn codec_err<S: Into<String>>(msg: S) -> EsError {
    EsError::Codec(msg.into())
}

fn zigzag(i: i64) -> u64 {
    ((i << 1) ^ (i >> 63)) as u64
}

fn unzigzag(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}

fn write_value(out: &mut Vec<u8>, value: &Value) -> Result<(), EsError> {
    match value {
        Value::Null => out.push(0x21),
        Value::Bool(false) => out.push(0x22),
        Value::Bool(true) => out.push(0x23),
        Value::Number(n) => write_number(out, n)?,
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push(0xF8);
            for item in items {
                write_value(out, item)?;
            }
            out.push(0xF9);
        }
        Value::Object(map) => {
            out.push(0xFA);
            for (key, item) in map {
                write_key(out, key);
                write_value(out, item)?;
            }
            out.push(0xFB);
        }
    }
    Ok(())
}

fn write_number(out: &mut Vec<u8>, n: &Number) -> Result<(), EsError> {
    if let Some(i) = n.as_i64() {
        if (-16..=15).contains(&i) {
            out.push(0xC0 | zigzag(i) as u8);
        } else if i32::try_from(i).is_ok() {
            out.push(0x24);
            write_vint(out, zigzag(i));
        } else {
            out.push(0x25);
            write_vint(out, zigzag(i));
        }
    } else {
        let text = n.to_string();
        if !text.contains(['.', 'e', 'E']) {
            // Beyond i64, so only a big integer can hold it
            out.push(0x26);
            write_big_integer(out, &integer_bytes(&text)?);
        } else if let Some(f) = exact_double(n, &text) {
            let bits = f.to_bits();
            out.push(0x29);
            for i in (0..10).rev() {
                out.push(((bits >> (7 * i)) & 0x7F) as u8);
            }
        } else {
            let (unscaled, scale) = split_decimal(&text)?;
            out.push(0x2A);
            write_vint(out, zigzag(i64::from(scale)));
            write_big_integer(out, &integer_bytes(&unscaled)?);
        }
    }
    Ok(())
}

/// The double `text` stands for, when writing that double back gives the
/// same text
fn exact_double(n: &Number, text: &str) -> Option<f64> {
    let f = n.as_f64()?;
    Number::from_f64(f)
        .filter(|back| back.to_string() == text)
        .map(|_| f)
}

/// Split a decimal's text into its unscaled digits and scale, so that the
/// value is `unscaled * 10^-scale`
fn split_decimal(text: &str) -> Result<(String, i32), EsError> {
    let bad = || codec_err(format!("number {} has no Smile form", text));
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(at) => (&text[..at], text[at + 1..].parse::<i64>().map_err(|_| bad())?),
        None => (text, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let scale = i64::try_from(frac_part.len()).map_err(|_| bad())? - exponent;
    let scale = i32::try_from(scale).map_err(|_| bad())?;
    Ok((format!("{}{}", int_part, frac_part), scale))
}

fn write_big_integer(out: &mut Vec<u8>, bytes: &[u8]) {
    write_vint(out, bytes.len() as u64);
    write_7bit(out, bytes);
}

/// Minimal big-endian two's complement bytes of a decimal integer
fn integer_bytes(text: &str) -> Result<Vec<u8>, EsError> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return Err(codec_err(format!("{} is not an integer", text)));
    }
    let mut magnitude: Vec<u8> = Vec::new();
    for c in digits.bytes() {
        let mut carry = u32::from(c - b'0');
        for byte in magnitude.iter_mut().rev() {
            let v = u32::from(*byte) * 10 + carry;
            *byte = (v & 0xFF) as u8;
            carry = v >> 8;
        }
        while carry > 0 {
            magnitude.insert(0, (carry & 0xFF) as u8);
            carry >>= 8;
        }
    }
    if magnitude.is_empty() {
        return Ok(vec![0]);
    }
    if negative {
        negate(&mut magnitude);
        if magnitude[0] & 0x80 == 0 {
            magnitude.insert(0, 0xFF);
        }
    } else if magnitude[0] & 0x80 != 0 {
        magnitude.insert(0, 0x00);
    }
    Ok(magnitude)
}

/// Decimal text of big-endian two's complement bytes
fn integer_text(bytes: &[u8]) -> String {
    let negative = bytes.first().map_or(false, |b| b & 0x80 != 0);
    let mut magnitude = bytes.to_vec();
    if negative {
        negate(&mut magnitude);
    }
    let mut digits = Vec::new();
    while magnitude.iter().any(|b| *b != 0) {
        let mut rem = 0u32;
        for byte in magnitude.iter_mut() {
            let v = (rem << 8) | u32::from(*byte);
            *byte = (v / 10) as u8;
            rem = v % 10;
        }
        digits.push(char::from(b'0' + rem as u8));
    }
    if digits.is_empty() {
        digits.push('0');
    }
    if negative {
        digits.push('-');
    }
    digits.into_iter().rev().collect()
}

/// Two's complement negation in place
fn negate(bytes: &mut [u8]) {
    for byte in bytes.iter_mut() {
        *byte = !*byte;
    }
    for byte in bytes.iter_mut().rev() {
        let (v, overflow) = byte.overflowing_add(1);
        *byte = v;
        if !overflow {
            break;
        }
    }
}

/// Text of `unscaled * 10^-scale`
fn decimal_text(unscaled: &str, scale: i64) -> String {
    let (sign, digits) = match unscaled.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", unscaled),
    };
    if scale <= 0 {
        if scale == 0 {
            return format!("{}{}", sign, digits);
        }
        return format!("{}{}e{}", sign, digits, -scale);
    }
    let scale = scale as usize;
    if scale > digits.len() + 6 {
        return format!("{}{}e-{}", sign, digits, scale);
    }
    let padded = if digits.len() <= scale {
        format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
    } else {
        digits.to_owned()
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - scale);
    format!("{}{}.{}", sign, int_part, frac_part)
}

fn write_string(out: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    let len = bytes.len();
    if len == 0 {
        out.push(0x20);
        return;
    }
    let (token, terminated) = if s.is_ascii() {
        match len {
            1..=32 => (0x40 | (len - 1) as u8, false),
            33..=64 => (0x60 | (len - 33) as u8, false),
            _ => (0xE0, true),
        }
    } else {
        match len {
            2..=33 => (0x80 | (len - 2) as u8, false),
            34..=65 => (0xA0 | (len - 34) as u8, false),
            _ => (0xE4, true),
        }
    };
    out.push(token);
    out.extend_from_slice(bytes);
    if terminated {
        out.push(END_OF_STRING);
    }
}

fn write_key(out: &mut Vec<u8>, key: &str) {
    let bytes = key.as_bytes();
    let len = bytes.len();
    if len == 0 {
        out.push(0x20);
    } else if key.is_ascii() && len <= 64 {
        out.push(0x80 | (len - 1) as u8);
        out.extend_from_slice(bytes);
    } else if !key.is_ascii() && len <= 57 {
        out.push(0xC0 | (len - 2) as u8);
        out.extend_from_slice(bytes);
    } else {
        out.push(0x34);
        out.extend_from_slice(bytes);
        out.push(END_OF_STRING);
    }
}

/// Variable length unsigned int: seven bits per byte, most significant
/// first, the last byte flagged with the high bit and carrying six bits.
fn write_vint(out: &mut Vec<u8>, value: u64) {
    let mut groups = vec![0x80 | (value & 0x3F) as u8];
    let mut rest = value >> 6;
    while rest > 0 {
        groups.push((rest & 0x7F) as u8);
        rest >>= 7;
    }
    out.extend(groups.into_iter().rev());
}

/// Raw bytes as a stream of seven bit groups, the final partial group right
/// aligned.
fn write_7bit(out: &mut Vec<u8>, bytes: &[u8]) {
    let mut acc: u32 = 0;
    let mut bits = 0;
    for &b in bytes {
        acc = (acc << 8) | u32::from(b);
        bits += 8;
        while bits >= 7 {
            bits -= 7;
            out.push(((acc >> bits) & 0x7F) as u8);
        }
        acc &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push((acc & 0x7F) as u8);
    }
}

struct Reader<'a> {
    input: &'a [u8],
    pos: usize,
    shared_names: Option<Vec<String>>,
    shared_values: Option<Vec<String>>,
    depth: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a [u8]) -> Result<Self, EsError> {
        if input.len() < 4 || input[..3] != HEADER {
            return Err(codec_err("missing Smile header"));
        }
        let flags = input[3];
        if flags >> 4 != 0 {
            return Err(codec_err(format!(
                "unsupported Smile version {}",
                flags >> 4
            )));
        }
        Ok(Reader {
            input,
            pos: 4,
            shared_names: (flags & FLAG_SHARED_NAMES != 0).then(Vec::new),
            shared_values: (flags & FLAG_SHARED_VALUES != 0).then(Vec::new),
            depth: 0,
        })
    }

    fn finish(&mut self) -> Result<(), EsError> {
        if self.pos < self.input.len() && self.input[self.pos] == END_OF_CONTENT {
            self.pos += 1;
        }
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(codec_err("trailing bytes after Smile document"))
        }
    }

    fn next(&mut self) -> Result<u8, EsError> {
        let b = *self
            .input
            .get(self.pos)
            .ok_or_else(|| codec_err("unexpected end of Smile document"))?;
        self.pos += 1;
        Ok(b)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], EsError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.input.len())
            .ok_or_else(|| codec_err("unexpected end of Smile document"))?;
        let slice = &self.input[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take_until_end_of_string(&mut self) -> Result<&'a [u8], EsError> {
        let rest = &self.input[self.pos..];
        let len = rest
            .iter()
            .position(|b| *b == END_OF_STRING)
            .ok_or_else(|| codec_err("unterminated Smile string"))?;
        self.pos += len + 1;
        Ok(&rest[..len])
    }

    fn text(&mut self, len: usize) -> Result<String, EsError> {
        let bytes = self.take(len)?;
        utf8(bytes)
    }

    fn read_vint(&mut self) -> Result<u64, EsError> {
        let mut value: u64 = 0;
        for _ in 0..10 {
            let b = self.next()?;
            if b & 0x80 != 0 {
                return Ok((value << 6) | u64::from(b & 0x3F));
            }
            value = (value << 7) | u64::from(b);
        }
        Err(codec_err("malformed Smile varint"))
    }

    fn read_fixed(&mut self, groups: usize) -> Result<u64, EsError> {
        let mut value: u64 = 0;
        for _ in 0..groups {
            value = (value << 7) | u64::from(self.next()? & 0x7F);
        }
        Ok(value)
    }

    fn read_7bit(&mut self, len: usize) -> Result<Vec<u8>, EsError> {
        let total_bits = len * 8;
        let groups = (total_bits + 6) / 7;
        let mut out = Vec::with_capacity(len);
        let mut acc: u32 = 0;
        let mut bits = 0;
        for g in 0..groups {
            let b = u32::from(self.next()? & 0x7F);
            let width = if g + 1 == groups { total_bits - 7 * g } else { 7 };
            acc = (acc << width) | b;
            bits += width;
            while bits >= 8 {
                bits -= 8;
                out.push((acc >> bits) as u8);
            }
            acc &= (1 << bits) - 1;
        }
        Ok(out)
    }

    fn read_big_integer(&mut self) -> Result<String, EsError> {
        let len = self.read_vint()?;
        if len == 0 || len > MAX_BIG_INTEGER_BYTES as u64 {
            return Err(codec_err("Smile big integer out of range"));
        }
        let bytes = self.read_7bit(len as usize)?;
        Ok(integer_text(&bytes))
    }

    fn read_big_decimal(&mut self) -> Result<Value, EsError> {
        let scale = unzigzag(self.read_vint()?);
        if i32::try_from(scale).is_err() {
            return Err(codec_err("Smile big decimal scale out of range"));
        }
        let unscaled = self.read_big_integer()?;
        number(&decimal_text(&unscaled, scale))
    }

    /// Track one more level of nesting
    fn descend(&mut self) -> Result<(), EsError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            Err(codec_err("Smile document nested too deeply"))
        } else {
            Ok(())
        }
    }

    fn remember_value(&mut self, s: &str) {
        if let Some(table) = self.shared_values.as_mut() {
            if table.len() >= MAX_SHARED_ENTRIES {
                table.clear();
            }
            table.push(s.to_owned());
        }
    }

    fn remember_name(&mut self, s: &str) {
        if s.len() > MAX_SHARED_NAME_BYTES {
            return;
        }
        if let Some(table) = self.shared_names.as_mut() {
            if table.len() >= MAX_SHARED_ENTRIES {
                table.clear();
            }
            table.push(s.to_owned());
        }
    }

    fn shared_value(&self, index: usize) -> Result<Value, EsError> {
        self.shared_values
            .as_ref()
            .and_then(|t| t.get(index))
            .map(|s| Value::String(s.clone()))
            .ok_or_else(|| codec_err(format!("invalid shared value reference {}", index)))
    }

    fn shared_name(&self, index: usize) -> Result<String, EsError> {
        self.shared_names
            .as_ref()
            .and_then(|t| t.get(index))
            .cloned()
            .ok_or_else(|| codec_err(format!("invalid shared name reference {}", index)))
    }

    fn short_text(&mut self, len: usize) -> Result<Value, EsError> {
        let s = self.text(len)?;
        self.remember_value(&s);
        Ok(Value::String(s))
    }

    fn read_value(&mut self) -> Result<Value, EsError> {
        let token = self.next()?;
        self.read_value_from(token)
    }

    fn read_value_from(&mut self, token: u8) -> Result<Value, EsError> {
        match token {
            0x01..=0x1F => self.shared_value(usize::from(token - 1)),
            0x20 => Ok(Value::String(String::new())),
            0x21 => Ok(Value::Null),
            0x22 => Ok(Value::Bool(false)),
            0x23 => Ok(Value::Bool(true)),
            0x24 | 0x25 => Ok(Value::from(unzigzag(self.read_vint()?))),
            0x26 => {
                let text = self.read_big_integer()?;
                number(&text)
            }
            0x28 => {
                let f = f32::from_bits(self.read_fixed(5)? as u32);
                float(f64::from(f))
            }
            0x29 => float(f64::from_bits(self.read_fixed(10)?)),
            0x2A => self.read_big_decimal(),
            0x40..=0x5F => self.short_text(usize::from(token & 0x1F) + 1),
            0x60..=0x7F => self.short_text(usize::from(token & 0x1F) + 33),
            0x80..=0x9F => self.short_text(usize::from(token & 0x1F) + 2),
            0xA0..=0xBF => self.short_text(usize::from(token & 0x1F) + 34),
            0xC0..=0xDF => Ok(Value::from(unzigzag(u64::from(token & 0x1F)))),
            0xE0 | 0xE4 => {
                let bytes = self.take_until_end_of_string()?;
                Ok(Value::String(utf8(bytes)?))
            }
            0xE8 | 0xFD => Err(codec_err("Smile binary values are not supported")),
            0xEC..=0xEF => {
                let low = self.next()?;
                self.shared_value((usize::from(token & 0x03) << 8) | usize::from(low))
            }
            0xF8 => {
                self.descend()?;
                let mut items = Vec::new();
                loop {
                    let t = self.next()?;
                    if t == 0xF9 {
                        break;
                    }
                    items.push(self.read_value_from(t)?);
                }
                self.depth -= 1;
                Ok(Value::Array(items))
            }
            0xFA => {
                self.descend()?;
                let mut map = Map::new();
                loop {
                    let t = self.next()?;
                    if t == 0xFB {
                        break;
                    }
                    let key = self.read_key(t)?;
                    let item = self.read_value()?;
                    map.insert(key, item);
                }
                self.depth -= 1;
                Ok(Value::Object(map))
            }
            other => Err(codec_err(format!("unexpected Smile token 0x{:02X}", other))),
        }
    }

    fn read_key(&mut self, token: u8) -> Result<String, EsError> {
        match token {
            0x20 => Ok(String::new()),
            0x30..=0x33 => {
                let low = self.next()?;
                self.shared_name((usize::from(token & 0x03) << 8) | usize::from(low))
            }
            0x34 => {
                let bytes = self.take_until_end_of_string()?;
                let name = utf8(bytes)?;
                self.remember_name(&name);
                Ok(name)
            }
            0x40..=0x7F => self.shared_name(usize::from(token & 0x3F)),
            0x80..=0xBF => {
                let name = self.text(usize::from(token & 0x3F) + 1)?;
                self.remember_name(&name);
                Ok(name)
            }
            0xC0..=0xF7 => {
                let name = self.text(usize::from(token & 0x3F) + 2)?;
                self.remember_name(&name);
                Ok(name)
            }
            other => Err(codec_err(format!("unexpected Smile key token 0x{:02X}", other))),
        }
    }
}

fn utf8(bytes: &[u8]) -> Result<String, EsError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| codec_err(format!("invalid UTF-8 in Smile string: {}", e)))
}

fn number(text: &str) -> Result<Value, EsError> {
    text.parse::<Number>()
        .map(Value::Number)
        .map_err(|e| codec_err(format!("invalid Smile number {}: {}", text, e)))
}

fn float(f: f64) -> Result<Value, EsError> {
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| codec_err(format!("{} cannot be represented", f)))
}
