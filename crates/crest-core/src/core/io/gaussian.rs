use crate::core::io::xyz::format_atom_line;
use crate::core::models::conformer::Conformer;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of template lines preceding the molecule specification: route, blank,
/// title, blank, and charge/multiplicity.
pub const HEADER_LINE_COUNT: usize = 5;

const DEFAULT_HEADER: [&str; HEADER_LINE_COUNT] =
    ["# opt freq b3lyp/def2svp em=gd3bj", "", "Title", "", "0 1"];

#[derive(Debug, Error)]
pub enum GaussianError {
    #[error("Failed to read keyword template '{path}': {source}", path = path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The Link 0 section (`%mem`, `%nprocshared`, `%chk`) at the top of an input file.
#[derive(Debug, Clone, PartialEq)]
pub struct Link0 {
    /// Memory specification including its unit, e.g. `48GB`.
    pub memory: String,
    pub nprocshared: usize,
    /// Absolute path of the checkpoint file, if one should be saved.
    pub checkpoint: Option<PathBuf>,
}

impl Default for Link0 {
    fn default() -> Self {
        Self {
            memory: "48GB".to_string(),
            nprocshared: 24,
            checkpoint: None,
        }
    }
}

impl Link0 {
    pub fn with_checkpoint(&self, checkpoint: Option<PathBuf>) -> Self {
        Self {
            checkpoint,
            ..self.clone()
        }
    }

    fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer, "%mem={}", self.memory)?;
        writeln!(writer, "%nprocshared={}", self.nprocshared)?;
        if let Some(chk) = &self.checkpoint {
            writeln!(writer, "%chk={}", chk.display())?;
        }
        Ok(())
    }
}

/// Route section, title and charge/multiplicity, plus any trailing sections.
///
/// The keyword file is split after [`HEADER_LINE_COUNT`] lines: the header goes
/// before the coordinates, everything after it (constraints, scan coordinates,
/// ECP basis sets) goes after them.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTemplate {
    pub header: Vec<String>,
    pub trailer: Vec<String>,
}

impl Default for RouteTemplate {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.iter().map(|s| s.to_string()).collect(),
            trailer: Vec::new(),
        }
    }
}

impl RouteTemplate {
    pub fn parse(text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        let trailer = if lines.len() > HEADER_LINE_COUNT {
            lines.split_off(HEADER_LINE_COUNT)
        } else {
            Vec::new()
        };
        Self {
            header: lines,
            trailer,
        }
    }

    pub fn load(path: &Path) -> Result<Self, GaussianError> {
        let text = fs::read_to_string(path).map_err(|source| GaussianError::Template {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Loads `path` if it exists and falls back to the default template otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, GaussianError> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Gaussian 16 input file (`.com`) for a single conformer.
pub struct GaussianInput;

impl GaussianInput {
    pub fn write_to(
        link0: &Link0,
        template: &RouteTemplate,
        conformer: &Conformer,
        writer: &mut impl Write,
    ) -> Result<(), GaussianError> {
        link0.write_to(writer)?;
        for line in &template.header {
            writeln!(writer, "{}", line)?;
        }
        for atom in &conformer.atoms {
            writeln!(writer, "{}", format_atom_line(atom))?;
        }
        for line in &template.trailer {
            writeln!(writer, "{}", line)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    pub fn write_to_path(
        link0: &Link0,
        template: &RouteTemplate,
        conformer: &Conformer,
        path: &Path,
    ) -> Result<(), GaussianError> {
        let mut writer = io::BufWriter::new(fs::File::create(path)?);
        Self::write_to(link0, template, conformer, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    fn methane_fragment() -> Conformer {
        Conformer::new(
            "-4.1",
            vec![
                Atom::new("C", Point3::new(0.0, 0.0, 0.0)),
                Atom::new("H", Point3::new(1.09, 0.0, 0.0)),
            ],
        )
    }

    fn render(link0: &Link0, template: &RouteTemplate) -> String {
        let mut buffer = Vec::new();
        GaussianInput::write_to(link0, template, &methane_fragment(), &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn default_input_matches_basic_layout() {
        let text = render(&Link0::default(), &RouteTemplate::default());
        let expected = "\
%mem=48GB
%nprocshared=24
# opt freq b3lyp/def2svp em=gd3bj

Title

0 1
C      0.0000000000     0.0000000000     0.0000000000
H      1.0900000000     0.0000000000     0.0000000000

";
        assert_eq!(text, expected);
    }

    #[test]
    fn crest_coordinate_precision_is_kept() {
        let conformer = Conformer::new(
            "",
            vec![Atom::new("N", Point3::new(-1.2345678901, 0.0000000001, 12.5))],
        );
        let mut buffer = Vec::new();
        GaussianInput::write_to(&Link0::default(), &RouteTemplate::default(), &conformer, &mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("N     -1.2345678901     0.0000000001    12.5000000000\n"));
    }

    #[test]
    fn checkpoint_line_follows_processor_count() {
        let link0 = Link0::default().with_checkpoint(Some(PathBuf::from("/scratch/run/c_1.chk")));
        let text = render(&link0, &RouteTemplate::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "%nprocshared=24");
        assert_eq!(lines[2], "%chk=/scratch/run/c_1.chk");
        assert_eq!(lines[3], "# opt freq b3lyp/def2svp em=gd3bj");
    }

    #[test]
    fn template_lines_beyond_header_are_written_after_coordinates() {
        let template = RouteTemplate::parse(
            "# opt=modredundant wb97xd/def2tzvp\n\nScan\n\n-1 2\n\nB 1 2 S 10 0.1\n",
        );
        assert_eq!(template.header.len(), 5);
        assert_eq!(template.trailer, vec!["".to_string(), "B 1 2 S 10 0.1".to_string()]);

        let text = render(&Link0::default(), &template);
        let coord_pos = text.find("H      1.09").unwrap();
        let scan_pos = text.find("B 1 2 S 10 0.1").unwrap();
        assert!(coord_pos < scan_pos);
        assert!(text.contains("-1 2\nC "));
        assert!(text.ends_with("B 1 2 S 10 0.1\n\n"));
    }

    #[test]
    fn short_template_has_no_trailer() {
        let template = RouteTemplate::parse("# sp hf/sto-3g\n\nT\n\n0 1\n");
        assert!(template.trailer.is_empty());
        assert_eq!(template.header[4], "0 1");
    }

    #[test]
    fn load_or_default_falls_back_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("input.txt");
        assert_eq!(
            RouteTemplate::load_or_default(&missing).unwrap(),
            RouteTemplate::default()
        );

        std::fs::write(&missing, "# sp pm7\n\nT\n\n0 1\n").unwrap();
        let loaded = RouteTemplate::load_or_default(&missing).unwrap();
        assert_eq!(loaded.header[0], "# sp pm7");
    }

    #[test]
    fn load_reports_template_path_on_failure() {
        let err = RouteTemplate::load(Path::new("/nonexistent/input.txt")).unwrap_err();
        assert!(matches!(err, GaussianError::Template { .. }));
        assert!(err.to_string().contains("/nonexistent/input.txt"));
    }
}
