//! Encoder.

use gx_ir::Data;
use num::{BigInt, Signed, Zero};

/// Encode a data tree as a bit string (pre-order over cons cells).
pub fn modulate(data: &Data) -> String {
    let mut out = String::new();
    let mut pending = vec![data];
    while let Some(node) = pending.pop() {
        match node {
            Data::Nil => out.push_str("00"),
            Data::Cons(car, cdr) => {
                out.push_str("11");
                pending.push(cdr);
                pending.push(car);
            }
            Data::Number(n) => push_number(&mut out, n),
        }
    }
    out
}

fn push_number(out: &mut String, n: &BigInt) {
    out.push_str(if n.is_negative() { "10" } else { "01" });

    let magnitude = n.magnitude();
    if magnitude.is_zero() {
        out.push('0');
        return;
    }

    let digits = magnitude.to_str_radix(2);
    let width = digits.len().div_ceil(4);
    out.extend(std::iter::repeat('1').take(width));
    out.push('0');
    out.extend(std::iter::repeat('0').take(4 * width - digits.len()));
    out.push_str(&digits);
}
