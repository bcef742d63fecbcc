use std::{fs, path::PathBuf};

/// Read sample text into string
pub fn read_sample_file() -> String {
    fs::read_to_string("tests/sample_text.txt").unwrap()
}

/// Read sample text lines and filter junk
pub fn read_sample_file_lines() -> Vec<String> {
    read_sample_file()
        .lines()
        .filter(|&l| !l.trim().is_empty())
        .map(|s| s.to_owned())
        .collect()
}

/// Engine definitions from demos directory with given extension
pub fn demo_files(extension: &str) -> Vec<PathBuf> {
    let mut paths: Vec<_> = fs::read_dir("demos")
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect();

    paths.sort();
    paths
}
