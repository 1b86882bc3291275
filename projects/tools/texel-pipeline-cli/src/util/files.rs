use crate::error::CliError;
use std::fs;
use std::path::{Path, PathBuf};
use texel_pipeline_image_api::{AddressMode, PixelFormat};

/// Recursively collects every file under `dir`.
///
/// Directories or entries that cannot be read are skipped.
pub fn find_all_files(dir: &Path, entries: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let dir_entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(()),
    };

    for entry in dir_entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue, // e.g. no access
        };

        let path = entry.path();
        if path.is_dir() {
            find_all_files(&path, entries)?;
        } else {
            entries.push(path);
        }
    }
    Ok(())
}

/// Lists the files to process: `input` itself, or every file beneath it.
pub fn collect_inputs(input: &Path) -> std::io::Result<Vec<PathBuf>> {
    if input.is_dir() {
        let mut entries = Vec::new();
        find_all_files(input, &mut entries)?;
        entries.sort();
        Ok(entries)
    } else {
        Ok(vec![input.to_path_buf()])
    }
}

/// Where the converted copy of `file` goes.
///
/// A single input file maps to `output` itself; files found under an input
/// directory keep their relative path beneath `output`.
pub fn target_path(input: &Path, output: &Path, file: &Path) -> PathBuf {
    match file.strip_prefix(input) {
        Ok(relative) if !relative.as_os_str().is_empty() => output.join(relative),
        _ => output.to_path_buf(),
    }
}

/// Prints a per-file error to stderr; returns whether the file succeeded.
pub fn handle_process_entry_error(result: Result<(), CliError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("{e}");
            false
        }
    }
}

/// Parses a pixel format from its canonical name (`R8G8B8A8_UNORM`) or the
/// short form without the `_UNORM` suffix (`bc1`, `r8g8b8a8`).
pub fn parse_format(value: &str) -> Result<PixelFormat, String> {
    PixelFormat::from_name(value)
        .or_else(|| PixelFormat::from_name(&format!("{value}_unorm")))
        .ok_or_else(|| format!("Unknown pixel format: {value}"))
}

/// Parses an address mode name.
pub fn parse_address_mode(value: &str) -> Result<AddressMode, String> {
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("bc1", PixelFormat::Bc1Unorm)]
    #[case("BC5_UNORM", PixelFormat::Bc5Unorm)]
    #[case("r8g8b8a8", PixelFormat::R8G8B8A8Unorm)]
    #[case("r16g16b16a16_float", PixelFormat::R16G16B16A16Float)]
    #[case("d24_unorm_s8_uint", PixelFormat::D24UnormS8Uint)]
    fn parses_format_names(#[case] value: &str, #[case] expected: PixelFormat) {
        assert_eq!(parse_format(value), Ok(expected));
    }

    #[rstest]
    #[case("bc7")]
    #[case("unknown")]
    #[case("")]
    fn rejects_unknown_formats(#[case] value: &str) {
        assert!(parse_format(value).is_err());
    }

    #[test]
    fn maps_directory_entries_below_the_output() {
        let input = Path::new("/in");
        let output = Path::new("/out");
        assert_eq!(
            target_path(input, output, Path::new("/in/a/b.texels")),
            Path::new("/out/a/b.texels")
        );
        assert_eq!(target_path(Path::new("/in/b.texels"), output, Path::new("/in/b.texels")), output);
    }

    #[test]
    fn collects_nested_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("a.texels"), b"").unwrap();
        fs::write(dir.path().join("nested/b.texels"), b"").unwrap();

        let files = collect_inputs(dir.path()).unwrap();
        assert_eq!(
            files,
            [dir.path().join("a.texels"), dir.path().join("nested/b.texels")]
        );
        assert_eq!(collect_inputs(&files[0]).unwrap(), [files[0].clone()]);
    }
}
