use std::io::{self, Read, Write};

/// Write a u16 in little-endian format
pub fn write_u16_le<W: Write>(writer: &mut W, value: u16) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Read a u16 in little-endian format
pub fn read_u16_le<R: Read>(reader: &mut R) -> io::Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

/// Write a u32 in little-endian format
pub fn write_u32_le<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Read a u32 in little-endian format
pub fn read_u32_le<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Write a u64 in little-endian format
pub fn write_u64_le<W: Write>(writer: &mut W, value: u64) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Read a u64 in little-endian format
pub fn read_u64_le<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Write an f64 as its little-endian bit pattern
pub fn write_f64_le<W: Write>(writer: &mut W, value: f64) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Read an f64 from its little-endian bit pattern
pub fn read_f64_le<R: Read>(reader: &mut R) -> io::Result<f64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_integer_roundtrip() {
        let mut buf = Vec::new();
        write_u16_le(&mut buf, 512).unwrap();
        write_u32_le(&mut buf, 70_000).unwrap();
        write_u64_le(&mut buf, u64::MAX).unwrap();

        let mut cursor = Cursor::new(buf);
        assert_eq!(read_u16_le(&mut cursor).unwrap(), 512);
        assert_eq!(read_u32_le(&mut cursor).unwrap(), 70_000);
        assert_eq!(read_u64_le(&mut cursor).unwrap(), u64::MAX);
    }

    #[test]
    fn test_f64_roundtrip() {
        let values = [0.0, 1.0, -1.5, std::f64::consts::PI, 1.0 + 2f64.log10()];
        let mut buf = Vec::new();
        for v in values {
            write_f64_le(&mut buf, v).unwrap();
        }
        let mut cursor = Cursor::new(buf);
        for v in values {
            assert_eq!(read_f64_le(&mut cursor).unwrap(), v);
        }
    }
}
