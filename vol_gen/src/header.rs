use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use nalgebra::Vector3;

pub const HEADER_LEN: usize = 3 * 2;

/// `.dat` header
/// little-endian, total length 6B
/// 1. resolution -- 3x 16bit ints (x,y,z)
/// 2. data -- x*y*z 16bit values, x growing fastest
pub fn write_header<W: Write>(writer: &mut W, dims: Vector3<u16>) -> std::io::Result<()> {
    writer.write_u16::<LittleEndian>(dims.x)?;
    writer.write_u16::<LittleEndian>(dims.y)?;
    writer.write_u16::<LittleEndian>(dims.z)?;
    Ok(())
}

pub fn write_samples<W: Write>(writer: &mut W, samples: &[u16]) -> std::io::Result<()> {
    for &s in samples {
        writer.write_u16::<LittleEndian>(s)?;
    }
    Ok(())
}
