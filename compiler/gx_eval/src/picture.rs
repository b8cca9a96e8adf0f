//! Decoding pictures out of data.

use gx_ir::{BigInt, Data, Picture, Point};

use crate::errors::{type_mismatch, EvalError};

/// `(x . y)` with both coordinates in `i64` range.
pub(crate) fn point_from_data(data: &Data) -> Result<Point, EvalError> {
    let Some((x, y)) = data.as_cons() else {
        return Err(type_mismatch("point (x . y)", data_kind(data)));
    };
    Ok(Point::new(coordinate(x)?, coordinate(y)?))
}

fn coordinate(data: &Data) -> Result<i64, EvalError> {
    let n: &BigInt = data
        .as_number()
        .ok_or_else(|| type_mismatch("number coordinate", data_kind(data)))?;
    i64::try_from(n).map_err(|_| type_mismatch("64-bit coordinate", "number out of range"))
}

/// A list of `(x . y)` cells.
pub(crate) fn picture_from_data(data: &Data) -> Result<Picture, EvalError> {
    let items = data
        .list_elements()
        .ok_or_else(|| type_mismatch("list of points", data_kind(data)))?;
    let points = items
        .into_iter()
        .map(point_from_data)
        .collect::<Result<_, _>>()?;
    Ok(Picture::new(points))
}

/// A list of point lists, as a protocol's draw step returns them.
pub fn pictures_from_data(data: &Data) -> Result<Vec<Picture>, EvalError> {
    let items = data
        .list_elements()
        .ok_or_else(|| type_mismatch("list of pictures", data_kind(data)))?;
    items.into_iter().map(picture_from_data).collect()
}

fn data_kind(data: &Data) -> &'static str {
    match data {
        Data::Number(_) => "number",
        Data::Nil => "nil",
        Data::Cons(..) => "cons",
    }
}
