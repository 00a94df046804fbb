use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use negspace_engine::{Heatmap, Level};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Look up a catalog level by id.
///
/// # Errors
///
/// Returns an error when no catalog level has the requested id.
pub fn find_level(level_id: u32) -> anyhow::Result<Level> {
    Level::catalog()
        .into_iter()
        .find(|level| level.id() == level_id)
        .with_context(|| format!("No level with id {level_id} in the catalog"))
}

const INTENSITY_GLYPHS: [char; 5] = [' ', '.', ':', '+', '#'];

/// Renders a heatmap as text art, one character per cell, denser glyphs for
/// hotter cells.
#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn render_heatmap(heatmap: &Heatmap) -> String {
    let mut art = String::with_capacity((heatmap.grid_width() + 1) * heatmap.grid_height());
    for y in 0..heatmap.grid_height() {
        for x in 0..heatmap.grid_width() {
            let intensity = heatmap.intensity_at(x, y) / heatmap.max_intensity();
            let glyph_index = ((intensity * (INTENSITY_GLYPHS.len() - 1) as f32).round() as usize)
                .min(INTENSITY_GLYPHS.len() - 1);
            art.push(INTENSITY_GLYPHS[glyph_index]);
        }
        art.push('\n');
    }
    art
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_level_known_and_unknown() {
        assert_eq!(find_level(0).unwrap().name(), "Tutorial");
        assert_eq!(find_level(10).unwrap().name(), "Final Challenge");
        assert!(find_level(99).is_err());
    }

    #[test]
    fn test_render_heatmap_dimensions_and_extremes() {
        let heatmap = Heatmap::from_ascii(
            "\
            #..\n\
            ...",
        );
        let art = render_heatmap(&heatmap);
        assert_eq!(art, "#  \n   \n");
    }
}
