//! Rendering snapshots as PNG images.

use anyhow::{Context, Result};
use cellgen_lib::{CellState, Snapshot};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

type Rgba = [u8; 4];

const WHITE: Rgba = [0xff, 0xff, 0xff, 0xff];
const BLACK: Rgba = [0x00, 0x00, 0x00, 0xff];
const CYAN: Rgba = [0x00, 0xff, 0xff, 0xff];
const MAGENTA: Rgba = [0xff, 0x00, 0xff, 0xff];
const BLUE: Rgba = [0x00, 0x00, 0xff, 0xff];
const GREEN: Rgba = [0x00, 0xff, 0x00, 0xff];
const RED: Rgba = [0xff, 0x00, 0x00, 0xff];

fn color(state: CellState) -> Rgba {
    match state {
        CellState::Dead | CellState::Off => WHITE,
        CellState::Alive | CellState::On => BLACK,
        CellState::Combined { state: false, .. } => WHITE,
        CellState::Combined {
            rule1: true,
            rule2: false,
            ..
        } => CYAN,
        CellState::Combined {
            rule1: false,
            rule2: true,
            ..
        } => MAGENTA,
        CellState::Combined { .. } => BLUE,
        CellState::Empty => BLUE,
        CellState::Healthy => GREEN,
        CellState::Sick => RED,
    }
}

/// RGBA pixels, row by row. Every cell is a `cell_size × cell_size` square.
fn pixels(snapshot: &Snapshot, cell_size: usize) -> Vec<u8> {
    let line_len = snapshot.columns() * cell_size * 4;
    let mut data = Vec::with_capacity(line_len * snapshot.rows() * cell_size);
    let mut line = Vec::with_capacity(line_len);
    for row in 0..snapshot.rows() {
        line.clear();
        for &state in snapshot.cells.row(row) {
            let color = color(state);
            for _ in 0..cell_size {
                line.extend_from_slice(&color);
            }
        }
        for _ in 0..cell_size {
            data.extend_from_slice(&line);
        }
    }
    data
}

/// Encodes a snapshot as a PNG image.
///
/// The image is `columns × cell_size` pixels wide and `rows × cell_size`
/// pixels high.
pub(crate) fn write_png<W: Write>(snapshot: &Snapshot, cell_size: u32, writer: W) -> Result<()> {
    let width = snapshot.columns() as u32 * cell_size;
    let height = snapshot.rows() as u32 * cell_size;
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels(snapshot, cell_size as usize))?;
    Ok(())
}

/// Appends `.png` to the file name unless it already ends with it.
pub(crate) fn png_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("png") => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".png");
            PathBuf::from(name)
        }
    }
}

/// Saves a snapshot as a PNG file, returning the actual path.
pub(crate) fn save(snapshot: &Snapshot, cell_size: u32, path: &Path) -> Result<PathBuf> {
    let path = png_path(path);
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_png(snapshot, cell_size, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!(
        "Saved generation {} to {}",
        snapshot.generation,
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgen_lib::{Automaton, Dimensions, SequenceSource, WhoWins, WhoWinsParams};

    #[test]
    fn file_names() {
        assert_eq!(png_path(Path::new("out")), PathBuf::from("out.png"));
        assert_eq!(png_path(Path::new("out.PNG")), PathBuf::from("out.PNG"));
        assert_eq!(png_path(Path::new("a/b.gen")), PathBuf::from("a/b.gen.png"));
    }

    #[test]
    fn combined_colors() {
        let combined = |state, rule1, rule2| {
            color(CellState::Combined {
                state,
                rule1,
                rule2,
            })
        };
        assert_eq!(combined(false, true, false), WHITE);
        assert_eq!(combined(true, true, false), CYAN);
        assert_eq!(combined(true, false, true), MAGENTA);
        assert_eq!(combined(true, true, true), BLUE);
    }

    #[test]
    fn encode() -> Result<()> {
        let mut who_wins = WhoWins::new(Dimensions::cells(4, 7), WhoWinsParams::default())
            .with_random(SequenceSource::constant(0.0));
        let snapshot = who_wins.initialize()?;

        let data = pixels(&snapshot, 3);
        assert_eq!(data.len(), 7 * 3 * 4 * 3 * 4);
        // The middle cell of the first row covers pixels 9 to 11 of lines 0 to 2.
        assert_eq!(data[9 * 4..10 * 4], BLUE);
        assert_eq!(data[8 * 4..9 * 4], WHITE);

        let mut png = Vec::new();
        write_png(&snapshot, 3, &mut png)?;
        let reader = png::Decoder::new(png.as_slice()).read_info()?;
        assert_eq!(reader.info().width, 21);
        assert_eq!(reader.info().height, 12);
        Ok(())
    }
}
