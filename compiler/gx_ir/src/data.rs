//! Detached data trees.
//!
//! A [`Data`] is what remains of a value once every cons cell has been
//! forced: numbers, nil, and pairs. It owns no arena nodes, so it can be
//! kept between interaction steps, compared structurally, written to the
//! audit log and fed to the modulation codec.
//!
//! Protocol state and replies can be lists hundreds of thousands of cells
//! long, so `Clone`, `PartialEq`, `Hash` and `Drop` walk the tree with an
//! explicit work stack instead of recursing per cell.

use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::mem;

use gx_stack::ensure_sufficient_stack;

use num::BigInt;

/// Number, nil, or cons tree.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Data {
    Number(BigInt),
    Nil,
    Cons(Box<Data>, Box<Data>),
}

impl Data {
    pub fn number(n: impl Into<BigInt>) -> Self {
        Data::Number(n.into())
    }

    pub fn cons(car: Data, cdr: Data) -> Self {
        Data::Cons(Box::new(car), Box::new(cdr))
    }

    /// Proper nil-terminated list of `items`.
    pub fn list(items: impl IntoIterator<Item = Data>) -> Self {
        let items: Vec<Data> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(Data::Nil, |tail, head| Data::cons(head, tail))
    }

    /// Cons of two numbers, the encoding of a point or vector.
    pub fn pair(x: impl Into<BigInt>, y: impl Into<BigInt>) -> Self {
        Data::cons(Data::number(x), Data::number(y))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Data::Nil)
    }

    pub fn as_number(&self) -> Option<&BigInt> {
        match self {
            Data::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_cons(&self) -> Option<(&Data, &Data)> {
        match self {
            Data::Cons(car, cdr) => Some((car, cdr)),
            _ => None,
        }
    }

    /// Elements of a proper list, or `None` if the spine does not end in nil.
    pub fn list_elements(&self) -> Option<Vec<&Data>> {
        let mut elems = Vec::new();
        let mut cur = self;
        loop {
            match cur {
                Data::Nil => return Some(elems),
                Data::Cons(car, cdr) => {
                    elems.push(&**car);
                    cur = cdr;
                }
                Data::Number(_) => return None,
            }
        }
    }

    /// Render as parseable program text (`ap ap cons 1 nil`).
    pub fn to_program_text(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if !out.is_empty() {
                out.push(' ');
            }
            match node {
                Data::Number(n) => {
                    let _ = write!(out, "{n}");
                }
                Data::Nil => out.push_str("nil"),
                Data::Cons(car, cdr) => {
                    out.push_str("ap ap cons");
                    pending.push(cdr);
                    pending.push(car);
                }
            }
        }
        out
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Number(n) => write!(f, "{n}"),
            Data::Nil => write!(f, "[]"),
            Data::Cons(car, cdr) => {
                if let Some(elems) = self.list_elements() {
                    write!(f, "[")?;
                    for (i, elem) in elems.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{elem}")?;
                    }
                    write!(f, "]")
                } else {
                    ensure_sufficient_stack(|| write!(f, "({car} . {cdr})"))
                }
            }
        }
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Data::Nil => f.write_str("Nil"),
            Data::Cons(car, cdr) => {
                ensure_sufficient_stack(|| f.debug_tuple("Cons").field(car).field(cdr).finish())
            }
        }
    }
}

enum CloneStep<'a> {
    Visit(&'a Data),
    Build,
}

impl Clone for Data {
    fn clone(&self) -> Self {
        let mut work = vec![CloneStep::Visit(self)];
        let mut built: Vec<Data> = Vec::new();
        while let Some(step) = work.pop() {
            match step {
                CloneStep::Visit(Data::Number(n)) => built.push(Data::Number(n.clone())),
                CloneStep::Visit(Data::Nil) => built.push(Data::Nil),
                CloneStep::Visit(Data::Cons(car, cdr)) => {
                    work.push(CloneStep::Build);
                    work.push(CloneStep::Visit(cdr));
                    work.push(CloneStep::Visit(car));
                }
                CloneStep::Build => {
                    let cdr = built.pop().unwrap_or(Data::Nil);
                    let car = built.pop().unwrap_or(Data::Nil);
                    built.push(Data::cons(car, cdr));
                }
            }
        }
        built.pop().unwrap_or(Data::Nil)
    }
}

impl PartialEq for Data {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Data::Number(a), Data::Number(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Data::Nil, Data::Nil) => {}
                (Data::Cons(a_car, a_cdr), Data::Cons(b_car, b_cdr)) => {
                    pending.push((a_cdr, b_cdr));
                    pending.push((a_car, b_car));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Data {}

impl Hash for Data {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            mem::discriminant(node).hash(state);
            match node {
                Data::Number(n) => n.hash(state),
                Data::Nil => {}
                Data::Cons(car, cdr) => {
                    pending.push(cdr);
                    pending.push(car);
                }
            }
        }
    }
}

impl Drop for Data {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_children(&mut node, &mut pending);
        }
    }
}

// Moves the halves of a cons out so the cell drops without recursing.
fn detach_children(node: &mut Data, pending: &mut Vec<Data>) {
    if let Data::Cons(car, cdr) = node {
        for half in [&mut **car, &mut **cdr] {
            if matches!(half, Data::Cons(..)) {
                pending.push(mem::replace(half, Data::Nil));
            }
        }
    }
}

impl From<i64> for Data {
    fn from(n: i64) -> Self {
        Data::number(n)
    }
}
