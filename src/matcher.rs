use image::Rgb;
use itertools::Itertools;

use crate::{
    color::squared_distance,
    error::{MosaicError, Result},
    tiles::DomainTile,
};

/// The tile whose average color is closest to `color`.
///
/// Linear scan over every tile. When several tiles share the minimum distance
/// the earliest one in `tiles` wins.
pub(crate) fn nearest<'a>(color: &Rgb<u8>, tiles: &'a [DomainTile]) -> Result<&'a DomainTile> {
    tiles
        .iter()
        .position_min_by_key(|tile| squared_distance(color, &tile.color))
        .map(|i| &tiles[i])
        .ok_or_else(|| MosaicError::input("no domain tiles to match against"))
}
