//! Minimal QR reader used to verify encoder output.
//!
//! Works straight from the module grid (no image processing) and shares no
//! code with the encoder beyond the capacity tables: reserved areas, the
//! placement walk, BCH words and GF(256) arithmetic are recomputed here.

#![allow(dead_code)]

use rust_qr_gen::encoder::tables::block_layout;
use rust_qr_gen::{ECLevel, ModuleGrid, Version};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Numeric(String),
    Alphanumeric(String),
    Byte(Vec<u8>),
    Kanji(Vec<u8>),
    Eci(u32),
    StructuredAppend { index: u8, total: u8, parity: u8 },
}

#[derive(Debug, Clone)]
pub struct Decoded {
    pub version: u8,
    pub ec_level: ECLevel,
    pub mask: u8,
    pub parts: Vec<Part>,
}

impl Decoded {
    /// Concatenated payload of every data part
    pub fn payload(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            match part {
                Part::Numeric(s) | Part::Alphanumeric(s) => out.extend_from_slice(s.as_bytes()),
                Part::Byte(b) | Part::Kanji(b) => out.extend_from_slice(b),
                Part::Eci(_) | Part::StructuredAppend { .. } => {}
            }
        }
        out
    }

    pub fn modes(&self) -> Vec<&'static str> {
        self.parts
            .iter()
            .map(|p| match p {
                Part::Numeric(_) => "numeric",
                Part::Alphanumeric(_) => "alphanumeric",
                Part::Byte(_) => "byte",
                Part::Kanji(_) => "kanji",
                Part::Eci(_) => "eci",
                Part::StructuredAppend { .. } => "structured-append",
            })
            .collect()
    }
}

const ALPHANUMERIC: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= 0x1D;
        }
        b >>= 1;
    }
    product
}

fn poly_mod(mut value: u32, generator: u32, degree: u32) -> u32 {
    let top = 32 - generator.leading_zeros();
    while value != 0 && 32 - value.leading_zeros() >= top {
        let shift = (32 - value.leading_zeros()) - top;
        value ^= generator << shift;
    }
    value & ((1 << degree) - 1)
}

pub fn format_word(ec_bits: u8, mask: u8) -> u16 {
    let data = u32::from(ec_bits) << 3 | u32::from(mask);
    let word = data << 10 | poly_mod(data << 10, 0x537, 10);
    (word ^ 0x5412) as u16
}

pub fn version_word(version: u8) -> u32 {
    let data = u32::from(version);
    data << 12 | poly_mod(data << 12, 0x1F25, 12)
}

fn alignment_positions(version: usize) -> Vec<usize> {
    if version == 1 {
        return Vec::new();
    }
    let num = version / 7 + 2;
    let size = version * 4 + 17;
    let step = if version == 32 {
        26
    } else {
        (version * 4 + num * 2 + 1) / (num * 2 - 2) * 2
    };
    let mut positions: Vec<usize> = (0..num - 1).map(|i| size - 7 - i * step).collect();
    positions.push(6);
    positions.reverse();
    positions
}

fn is_reserved(version: usize, x: usize, y: usize) -> bool {
    let size = version * 4 + 17;
    if (x < 9 && y < 9) || (x >= size - 8 && y < 9) || (x < 9 && y >= size - 8) {
        return true;
    }
    if x == 6 || y == 6 {
        return true;
    }
    if version >= 7 && ((x >= size - 11 && x < size - 8 && y < 6) || (y >= size - 11 && y < size - 8 && x < 6)) {
        return true;
    }
    let align = alignment_positions(version);
    let last = align.len().saturating_sub(1);
    for (i, &cx) in align.iter().enumerate() {
        for (j, &cy) in align.iter().enumerate() {
            let corner = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
            if !corner && x.abs_diff(cx) <= 2 && y.abs_diff(cy) <= 2 {
                return true;
            }
        }
    }
    false
}

fn mask_bit(mask: u8, row: usize, col: usize) -> bool {
    let (i, j) = (row, col);
    match mask {
        0 => (i + j) % 2 == 0,
        1 => i % 2 == 0,
        2 => j % 3 == 0,
        3 => (i + j) % 3 == 0,
        4 => (i / 2 + j / 3) % 2 == 0,
        5 => (i * j) % 2 + (i * j) % 3 == 0,
        6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
        _ => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
    }
}

fn read_format(grid: &ModuleGrid) -> Result<(u8, u8), String> {
    let size = grid.side_length();
    let at = |x: usize, y: usize| grid.module_at(y, x);
    let mut first = 0u16;
    let mut second = 0u16;
    let mut coords: Vec<(usize, usize)> = (0..6).map(|i| (8, i)).collect();
    coords.extend([(8, 7), (8, 8), (7, 8)]);
    coords.extend((9..15).map(|i| (14 - i, 8)));
    for (i, &(x, y)) in coords.iter().enumerate() {
        first |= u16::from(at(x, y)) << i;
    }
    for i in 0..8 {
        second |= u16::from(at(size - 1 - i, 8)) << i;
    }
    for i in 8..15 {
        second |= u16::from(at(8, size - 15 + i)) << i;
    }
    if first != second {
        return Err(format!("format copies differ: {first:015b} vs {second:015b}"));
    }
    if !at(8, size - 8) {
        return Err("dark module missing".into());
    }
    for ec_bits in 0..4u8 {
        for mask in 0..8u8 {
            if format_word(ec_bits, mask) == first {
                return Ok((ec_bits, mask));
            }
        }
    }
    Err(format!("no format word matches {first:015b}"))
}

fn check_version_info(grid: &ModuleGrid, version: usize) -> Result<(), String> {
    if version < 7 {
        return Ok(());
    }
    let size = grid.side_length();
    let expected = version_word(version as u8);
    for i in 0..18 {
        let bit = (expected >> i) & 1 == 1;
        let a = size - 11 + i % 3;
        let b = i / 3;
        if grid.module_at(b, a) != bit || grid.module_at(a, b) != bit {
            return Err(format!("version info bit {i} wrong"));
        }
    }
    Ok(())
}

/// Check the fixed patterns a scanner locks on to
fn check_function_patterns(grid: &ModuleGrid) -> Result<(), String> {
    let size = grid.side_length();
    for (ox, oy) in [(0, 0), (size - 7, 0), (0, size - 7)] {
        for dy in 0..7usize {
            for dx in 0..7usize {
                let ring = dx.abs_diff(3).max(dy.abs_diff(3));
                if grid.module_at(oy + dy, ox + dx) != (ring != 2) {
                    return Err(format!("finder at ({ox}, {oy}) damaged"));
                }
            }
        }
    }
    for i in 8..size - 8 {
        if grid.module_at(6, i) != (i % 2 == 0) || grid.module_at(i, 6) != (i % 2 == 0) {
            return Err(format!("timing pattern wrong at {i}"));
        }
    }
    Ok(())
}

struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl BitReader<'_> {
    fn remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    fn read(&mut self, count: usize) -> Result<u32, String> {
        if count > self.remaining() {
            return Err("bitstream truncated".into());
        }
        let mut value = 0u32;
        for _ in 0..count {
            let bit = (self.data[self.pos / 8] >> (7 - self.pos % 8)) & 1;
            value = value << 1 | u32::from(bit);
            self.pos += 1;
        }
        Ok(value)
    }
}

fn count_bits(mode: u32, version: usize) -> usize {
    let class = match version {
        1..=9 => 0,
        10..=26 => 1,
        _ => 2,
    };
    match mode {
        0b0001 => [10, 12, 14][class],
        0b0010 => [9, 11, 13][class],
        0b0100 => [8, 16, 16][class],
        _ => [8, 10, 12][class],
    }
}

fn parse_payload(data: &[u8], version: usize) -> Result<Vec<Part>, String> {
    let mut reader = BitReader { data, pos: 0 };
    let mut parts = Vec::new();
    while reader.remaining() >= 4 {
        let mode = reader.read(4)?;
        match mode {
            0 => break,
            0b0001 => {
                let mut count = reader.read(count_bits(mode, version))? as usize;
                let mut s = String::new();
                while count > 0 {
                    let take = count.min(3);
                    let value = reader.read([0, 4, 7, 10][take])?;
                    s.push_str(&format!("{value:0width$}", width = take));
                    count -= take;
                }
                parts.push(Part::Numeric(s));
            }
            0b0010 => {
                let mut count = reader.read(count_bits(mode, version))? as usize;
                let mut s = String::new();
                while count >= 2 {
                    let value = reader.read(11)? as usize;
                    s.push(ALPHANUMERIC[value / 45] as char);
                    s.push(ALPHANUMERIC[value % 45] as char);
                    count -= 2;
                }
                if count == 1 {
                    s.push(ALPHANUMERIC[reader.read(6)? as usize] as char);
                }
                parts.push(Part::Alphanumeric(s));
            }
            0b0100 => {
                let count = reader.read(count_bits(mode, version))? as usize;
                let bytes = (0..count)
                    .map(|_| reader.read(8).map(|b| b as u8))
                    .collect::<Result<Vec<_>, _>>()?;
                parts.push(Part::Byte(bytes));
            }
            0b1000 => {
                let count = reader.read(count_bits(mode, version))? as usize;
                let mut bytes = Vec::with_capacity(count * 2);
                for _ in 0..count {
                    let value = reader.read(13)?;
                    let packed = (value / 0xC0) << 8 | (value % 0xC0);
                    let sjis = if packed + 0x8140 <= 0x9FFC {
                        packed + 0x8140
                    } else {
                        packed + 0xC140
                    };
                    bytes.push((sjis >> 8) as u8);
                    bytes.push(sjis as u8);
                }
                parts.push(Part::Kanji(bytes));
            }
            0b0111 => {
                let first = reader.read(8)?;
                let assignment = if first & 0x80 == 0 {
                    first
                } else if first & 0xC0 == 0x80 {
                    (first & 0x3F) << 8 | reader.read(8)?
                } else {
                    (first & 0x1F) << 16 | reader.read(16)?
                };
                parts.push(Part::Eci(assignment));
            }
            0b0011 => {
                let index = reader.read(4)? as u8;
                let total = reader.read(4)? as u8 + 1;
                let parity = reader.read(8)? as u8;
                parts.push(Part::StructuredAppend {
                    index,
                    total,
                    parity,
                });
            }
            other => return Err(format!("unknown mode indicator {other:04b}")),
        }
    }
    Ok(parts)
}

/// Decode a finished symbol, verifying structure and EC codewords
pub fn read_symbol(grid: &ModuleGrid) -> Result<Decoded, String> {
    let size = grid.side_length();
    if size < 21 || (size - 17) % 4 != 0 {
        return Err(format!("bad side length {size}"));
    }
    let version = (size - 17) / 4;
    check_function_patterns(grid)?;
    let (ec_bits, mask) = read_format(grid)?;
    check_version_info(grid, version)?;
    let ec_level = match ec_bits {
        0b01 => ECLevel::L,
        0b00 => ECLevel::M,
        0b11 => ECLevel::Q,
        _ => ECLevel::H,
    };

    // Zig-zag extraction with unmasking
    let mut bits = Vec::new();
    let mut col = size as isize - 1;
    let mut upward = true;
    while col > 0 {
        if col == 6 {
            col -= 1;
        }
        for step in 0..size {
            let y = if upward { size - 1 - step } else { step };
            for x in [col as usize, col as usize - 1] {
                if !is_reserved(version, x, y) {
                    bits.push(grid.module_at(y, x) ^ mask_bit(mask, y, x));
                }
            }
        }
        upward = !upward;
        col -= 2;
    }
    let codewords: Vec<u8> = bits
        .chunks_exact(8)
        .map(|c| c.iter().fold(0u8, |acc, &b| acc << 1 | u8::from(b)))
        .collect();

    // De-interleave
    let version_ref = Version::new(version as u8).ok_or("bad version")?;
    let layout = block_layout(version_ref, ec_level);
    let mut blocks: Vec<Vec<u8>> = vec![Vec::new(); layout.num_blocks];
    let mut it = codewords.iter().copied();
    let longest = layout.short_data_len + usize::from(layout.num_short_blocks < layout.num_blocks);
    for i in 0..longest {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < layout.data_len(b) {
                block.push(it.next().ok_or("ran out of codewords")?);
            }
        }
    }
    for _ in 0..layout.ecc_per_block {
        for block in blocks.iter_mut() {
            block.push(it.next().ok_or("ran out of codewords")?);
        }
    }

    // Every root of the generator must be a root of each block
    let mut data = Vec::new();
    for (b, block) in blocks.iter().enumerate() {
        let mut root = 1u8;
        for k in 0..layout.ecc_per_block {
            let syndrome = block.iter().fold(0u8, |acc, &c| gf_mul(acc, root) ^ c);
            if syndrome != 0 {
                return Err(format!("block {b} syndrome {k} is {syndrome}"));
            }
            root = gf_mul(root, 2);
        }
        data.extend_from_slice(&block[..layout.data_len(b)]);
    }

    Ok(Decoded {
        version: version as u8,
        ec_level,
        mask,
        parts: parse_payload(&data, version)?,
    })
}

/// Golden 21x21 symbol for "4376471154038" at 1-M with mask 7
pub const GOLDEN_V1M: [&str; 21] = [
    "#######.....#.#######",
    "#.....#..#....#.....#",
    "#.###.#...##..#.###.#",
    "#.###.#...#...#.###.#",
    "#.###.#..####.#.###.#",
    "#.....#.#.#...#.....#",
    "#######.#.#.#.#######",
    ".........#...........",
    "#..#.##.######.#.....",
    "###.#..##..#.#.#.##..",
    "#..#.####.##..###...#",
    "..#.#..#....#####....",
    "..#...##.#.#.###.##..",
    "........#.#..####.##.",
    "#######...###.#.####.",
    "#.....#.#.....##....#",
    "#.###.#..##.###..#.##",
    "#.###.#.#.#..####..##",
    "#.###.#..###.###.#..#",
    "#.....#..####..##..#.",
    "#######.###..#.###...",
];

pub fn render_ascii(grid: &ModuleGrid) -> Vec<String> {
    grid.to_rows()
        .iter()
        .map(|row| row.iter().map(|&dark| if dark { '#' } else { '.' }).collect())
        .collect()
}
