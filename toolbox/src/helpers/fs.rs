use crate::errors::PathError;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub fn create_dir(path: &Path) -> Result<(), PathError> {
    match std::fs::metadata(path) {
        Ok(metadata) => {
            if metadata.is_dir() {
                Ok(())
            } else {
                Err(PathError::Inaccessible(path.display().to_string()))
            }
        }
        Err(_e) => std::fs::create_dir_all(path)
            .map_err(|e| PathError::Output(path.display().to_string(), e)),
    }
}

/// Open `path` for reading, or standard input when no path is given
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, PathError> {
    match path {
        Some(path) => {
            let file =
                File::open(path).map_err(|e| PathError::Input(path.display().to_string(), e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(std::io::stdin().lock())),
    }
}

/// Create `path` and its parent directories, or use standard output when no
/// path is given
pub fn create_output(path: Option<&Path>) -> Result<Box<dyn Write>, PathError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                create_dir(parent)?;
            }
            let file =
                File::create(path).map_err(|e| PathError::Output(path.display().to_string(), e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_open_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dives.xml");
        std::fs::write(&path, "<divelog/>").unwrap();

        let mut contents = String::new();
        open_input(Some(&path))
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!("<divelog/>", contents);
    }

    #[test]
    fn test_open_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.xml");

        assert!(matches!(
            open_input(Some(&path)),
            Err(PathError::Input(_, _))
        ));
    }

    #[test]
    fn test_create_output_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shifted").join("dives.xml");

        let mut output = create_output(Some(&path)).unwrap();
        output.write_all(b"<divelog/>\n").unwrap();
        output.flush().unwrap();
        drop(output);

        assert_eq!("<divelog/>\n", std::fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn test_create_dir_on_file() {
        let file = tempfile::NamedTempFile::new().unwrap();

        assert!(matches!(
            create_dir(file.path()),
            Err(PathError::Inaccessible(_))
        ));
    }
}
