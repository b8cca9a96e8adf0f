//! Recursive-descent decoder.

use gx_ir::Data;
use gx_stack::ensure_sufficient_stack;
use num::{BigInt, BigUint};

use crate::SignalError;

/// Decode exactly one value from `bits`.
///
/// Fails if the string holds anything but `0`/`1`, if a value is cut off,
/// or if bits remain after the first complete value.
pub fn demodulate(bits: &str) -> Result<Data, SignalError> {
    if let Some((offset, found)) = bits.char_indices().find(|&(_, c)| c != '0' && c != '1') {
        return Err(SignalError::InvalidCharacter { found, offset });
    }

    let mut reader = Reader {
        bits: bits.as_bytes(),
        pos: 0,
    };
    let data = reader.value()?;
    if reader.pos < reader.bits.len() {
        return Err(SignalError::TrailingBits {
            offset: reader.pos,
            count: reader.bits.len() - reader.pos,
        });
    }
    Ok(data)
}

struct Reader<'a> {
    bits: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn value(&mut self) -> Result<Data, SignalError> {
        let offset = self.pos;
        let tag = self.take(2)?;
        match tag {
            b"00" => Ok(Data::Nil),
            b"11" => ensure_sufficient_stack(|| {
                let car = self.value()?;
                let cdr = self.value()?;
                Ok(Data::cons(car, cdr))
            }),
            b"01" => self.number(false),
            b"10" => self.number(true),
            _ => Err(SignalError::InvalidTag {
                tag: String::from_utf8_lossy(tag).into_owned(),
                offset,
            }),
        }
    }

    fn number(&mut self, negative: bool) -> Result<Data, SignalError> {
        let mut width = 0usize;
        while self.take(1)? == b"1" {
            width += 1;
        }
        if width == 0 {
            return Ok(Data::number(0));
        }

        let digits = self.take(4 * width)?;
        // Only 0/1 reach here, so both conversions succeed.
        let magnitude = BigUint::parse_bytes(digits, 2).unwrap_or_default();
        let n = BigInt::from(magnitude);
        Ok(Data::Number(if negative { -n } else { n }))
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], SignalError> {
        let end = self
            .pos
            .checked_add(count)
            .filter(|&end| end <= self.bits.len())
            .ok_or(SignalError::Truncated { offset: self.pos })?;
        let bits: &'a [u8] = self.bits;
        let slice = &bits[self.pos..end];
        self.pos = end;
        Ok(slice)
    }
}
