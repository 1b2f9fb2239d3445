//! `_ground.ldr` output.
//!
//! The output is a regular single-model LDraw file: a short header, the
//! brick count, then one unrotated type-1 line per brick instance standing on
//! the plate (Y points down in LDraw, so bricks are lifted by half their
//! height).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::layout::{GroundLayout, PlacedBrick};
use super::{LayoutError, LayoutResult};

/// Appended to the input stem to name the output file.
pub const GROUND_SUFFIX: &str = "_ground.ldr";

const HEADER: [&str; 3] = ["0 Untitled Model", "0 Name: ground", "0 Author: ldx"];

const IDENTITY_ROTATION: &str = "1 0 0 0 1 0 0 0 1";

/// The type-1 line placing `brick` on the plate.
pub fn brick_line(brick: &PlacedBrick) -> String {
    let request = &brick.request;
    let x = brick.x + request.width / 2;
    let y = -((request.height / 2.0) as i64);
    let z = brick.y + request.depth / 2;

    format!(
        "1 {} {} {} {} {} {}",
        request.color, x, y, z, IDENTITY_ROTATION, request.name
    )
}

/// Write `layout` as an LDraw document.
pub fn write_ground<W: Write>(out: &mut W, layout: &GroundLayout) -> std::io::Result<()> {
    for line in HEADER {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "0 NumOfBricks: {}", layout.brick_count())?;

    for brick in &layout.bricks {
        writeln!(out, "{}", brick_line(brick))?;
    }

    writeln!(out)?;
    out.flush()
}

/// Write `layout` to `path`, replacing any existing file.
pub fn save_ground<P: AsRef<Path>>(path: P, layout: &GroundLayout) -> LayoutResult<()> {
    let path = path.as_ref();
    let io_error = |source| LayoutError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    write_ground(&mut BufWriter::new(file), layout).map_err(io_error)?;

    log::info!("Wrote {} bricks to {}", layout.brick_count(), path.display());
    Ok(())
}

/// `models/house.mpd` -> `models/house_ground.ldr`.
pub fn ground_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, GROUND_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ground::layout::PlacementRequest;

    fn brick(name: &str, color: u32, (x, y): (i64, i64), (width, depth): (i64, i64), height: f64) -> PlacedBrick {
        PlacedBrick {
            request: PlacementRequest {
                name: name.to_string(),
                color,
                width,
                depth,
                height,
            },
            x,
            y,
        }
    }

    fn sample_layout() -> GroundLayout {
        GroundLayout {
            bricks: vec![
                brick("3001.dat", 4, (0, 0), (150, 90), 28.0),
                brick("3003.dat", 1, (150, 0), (90, 90), 28.0),
                brick("3024.dat", 14, (0, 90), (60, 60), 11.0),
            ],
            width: 240,
            depth: 150,
        }
    }

    fn render(layout: &GroundLayout) -> String {
        let mut buf = Vec::new();
        write_ground(&mut buf, layout).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_brick_line() {
        let line = brick_line(&brick("3001.dat", 4, (150, 90), (150, 90), 28.0));
        assert_eq!(line, "1 4 225 -14 135 1 0 0 0 1 0 0 0 1 3001.dat");
    }

    #[test]
    fn test_odd_height_truncates() {
        let line = brick_line(&brick("3024.dat", 14, (0, 0), (60, 60), 11.0));
        assert_eq!(line, "1 14 30 -5 30 1 0 0 0 1 0 0 0 1 3024.dat");
    }

    #[test]
    fn test_document_layout() {
        let text = render(&sample_layout());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4 + 3 + 1);
        assert_eq!(&lines[..4], &["0 Untitled Model", "0 Name: ground", "0 Author: ldx", "0 NumOfBricks: 3"]);
        assert!(lines[4..7].iter().all(|l| l.starts_with("1 ")));
        assert_eq!(lines[7], "");
    }

    #[test]
    fn test_empty_layout() {
        let text = render(&GroundLayout::default());
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("0 NumOfBricks: 0\n"));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            ground_output_path("models/house.mpd"),
            PathBuf::from("models/house_ground.ldr")
        );
        assert_eq!(ground_output_path("car.LDR"), PathBuf::from("car_ground.ldr"));
        assert_eq!(ground_output_path("a.b.ldr"), PathBuf::from("a.b_ground.ldr"));
    }

    #[test]
    fn test_save_to_missing_directory() {
        let err = save_ground("/definitely/not/here/out.ldr", &sample_layout()).unwrap_err();
        assert!(matches!(err, LayoutError::Io { .. }));
    }
}
