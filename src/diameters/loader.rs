//! CSV loader for the diameter reference file.
//!
//! The file is a plain comma-delimited CSV with a header row. One column names
//! the plate image, the rest hold per-disk measurements:
//!
//! ```csv
//! image file name,disk 1,disk 2,disk 3
//! plate-07,10 mm,15mm,20.5 mm
//! ```
//!
//! The data is hand-edited in practice, so parsing is best-effort: rows with
//! no usable image name and cells that do not reduce to a number are skipped
//! silently rather than failing the whole load.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use super::{Diameter, DiameterError, DiameterMap, DiameterSettings};

/// Header of the column naming the plate image.
const IMAGE_NAME_HEADER: &str = "image file name";

/// Reads the CSV at `path` into a [`DiameterMap`].
///
/// Pure with respect to process state: the caller decides whether to install
/// the result into a [`super::DiameterRegistry`]. Records are streamed one at
/// a time, so the file may be arbitrarily large.
///
/// # Errors
///
/// * [`DiameterError::FileNotFound`] when nothing exists at `path`; checked
///   before a reader is opened.
/// * [`DiameterError::Stream`] for any read or parse failure, carrying the
///   underlying error's message unchanged.
pub fn load_diameters_map(
    path: &Path,
    settings: &DiameterSettings,
) -> Result<DiameterMap, DiameterError> {
    if !path.exists() {
        return Err(DiameterError::FileNotFound);
    }

    let mut reader = ReaderBuilder::new().from_path(path)?;
    let headers = reader.headers()?.clone();

    // Header matching trims surrounding whitespace; exported sheets sometimes
    // carry a trailing space ("disk 1 ").
    let image_column = headers.iter().position(|h| h.trim() == IMAGE_NAME_HEADER);
    if image_column.is_none() {
        warn!(
            "No '{}' column in {}; no entries will be loaded",
            IMAGE_NAME_HEADER,
            path.display()
        );
    }

    let disk_columns: Vec<(u32, usize)> = (1..=settings.max_disks)
        .filter_map(|disk| {
            let header = format!("disk {disk}");
            headers
                .iter()
                .position(|h| h.trim() == header)
                .map(|index| (disk, index))
        })
        .collect();

    let mut map = DiameterMap::new();
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record)? {
        let Some(name) = image_column.and_then(|index| record.get(index)) else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let mut diameters = Vec::new();
        for &(disk, index) in &disk_columns {
            let Some(raw) = record.get(index) else {
                continue;
            };
            if raw.trim().is_empty() {
                continue;
            }

            // Cells may carry unit suffixes ("10 mm", "15mm"); reduce to the
            // numeric part before parsing.
            let cleaned: String = raw
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            let Ok(diameter_mm) = cleaned.parse::<f64>() else {
                debug!(image = name, disk, raw, "skipping non-numeric diameter cell");
                continue;
            };

            diameters.push(Diameter { disk, diameter_mm });
        }

        if !diameters.is_empty() {
            // Duplicate image rows overwrite earlier ones: last row wins.
            map.insert(format!("{name}{}", settings.image_suffix), diameters);
        }
    }

    info!(
        "Loaded diameters for {} images from {}",
        map.len(),
        path.display()
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn load(content: &str) -> DiameterMap {
        let file = write_csv(content);
        load_diameters_map(file.path(), &DiameterSettings::default()).unwrap()
    }

    #[test]
    fn fails_when_file_does_not_exist() {
        let err = load_diameters_map(
            Path::new("/nonexistent/diameters.csv"),
            &DiameterSettings::default(),
        )
        .unwrap_err();

        assert!(matches!(err, DiameterError::FileNotFound));
        assert_eq!(err.to_string(), "File not found");
    }

    #[test]
    fn propagates_reader_errors() {
        // A directory exists but cannot be opened as a CSV stream.
        let dir = TempDir::new().unwrap();
        let err =
            load_diameters_map(dir.path(), &DiameterSettings::default()).unwrap_err();

        assert!(matches!(err, DiameterError::Stream(_)));
    }

    #[test]
    fn parses_valid_rows_with_mixed_unit_spelling() {
        let map = load("image file name,disk 1,disk 2,disk 3\ntest-image,10 mm,15mm,20.5mm\n");

        assert_eq!(
            map.get("test-image.png").unwrap(),
            &[
                Diameter { disk: 1, diameter_mm: 10.0 },
                Diameter { disk: 2, diameter_mm: 15.0 },
                Diameter { disk: 3, diameter_mm: 20.5 },
            ]
        );
    }

    #[test]
    fn ignores_rows_with_missing_image_name() {
        let map = load("image file name,disk 1\n,10\n");
        assert!(map.is_empty());
    }

    #[test]
    fn ignores_rows_with_whitespace_only_image_name() {
        let map = load("image file name,disk 1\n   ,10\n");
        assert!(map.is_empty());
    }

    #[test]
    fn skips_non_numeric_diameter_values() {
        let map = load("image file name,disk 1,disk 2\ntest-image,abc,20\n");

        assert_eq!(
            map.get("test-image.png").unwrap(),
            &[Diameter { disk: 2, diameter_mm: 20.0 }]
        );
    }

    #[test]
    fn drops_rows_with_no_valid_diameter_data() {
        let map = load("image file name,disk 1\ntest-image,\n");
        // No empty-list entry is created for the image.
        assert!(map.is_empty());
    }

    #[test]
    fn tolerates_trailing_spaces_in_disk_headers() {
        let map = load("image file name,disk 1 ,disk 2 \ntest-image,10,20\n");

        assert_eq!(
            map.get("test-image.png").unwrap(),
            &[
                Diameter { disk: 1, diameter_mm: 10.0 },
                Diameter { disk: 2, diameter_mm: 20.0 },
            ]
        );
    }

    #[test]
    fn keeps_entries_for_multiple_images_independent() {
        let map = load(
            "image file name,disk 1,disk 2\nimg1,10 mm,15 mm\nimg2,20 mm,25 mm\n",
        );

        assert_eq!(
            map.get("img1.png").unwrap(),
            &[
                Diameter { disk: 1, diameter_mm: 10.0 },
                Diameter { disk: 2, diameter_mm: 15.0 },
            ]
        );
        assert_eq!(
            map.get("img2.png").unwrap(),
            &[
                Diameter { disk: 1, diameter_mm: 20.0 },
                Diameter { disk: 2, diameter_mm: 25.0 },
            ]
        );
    }

    #[test]
    fn last_row_wins_for_duplicate_image_names() {
        let map = load("image file name,disk 1\nimg,10\nimg,30\n");

        assert_eq!(
            map.get("img.png").unwrap(),
            &[Diameter { disk: 1, diameter_mm: 30.0 }]
        );
    }

    #[test]
    fn trims_whitespace_around_image_names() {
        let map = load("image file name,disk 1\n  img1  ,10\n");
        assert!(map.contains_key("img1.png"));
    }

    #[test]
    fn applies_configured_image_suffix() {
        let file = write_csv("image file name,disk 1\nimg1,10\n");
        let settings = DiameterSettings {
            image_suffix: ".jpg".to_string(),
            ..DiameterSettings::default()
        };

        let map = load_diameters_map(file.path(), &settings).unwrap();
        assert!(map.contains_key("img1.jpg"));
    }

    #[test]
    fn ignores_disk_columns_beyond_configured_maximum() {
        let file = write_csv("image file name,disk 1,disk 2,disk 3\nimg1,10,20,30\n");
        let settings = DiameterSettings {
            max_disks: 2,
            ..DiameterSettings::default()
        };

        let map = load_diameters_map(file.path(), &settings).unwrap();
        assert_eq!(
            map.get("img1.png").unwrap(),
            &[
                Diameter { disk: 1, diameter_mm: 10.0 },
                Diameter { disk: 2, diameter_mm: 20.0 },
            ]
        );
    }
}
