use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use cedar_errors::Renderer;
use cedar_parse::translation_unit;
use cedar_syntax::Grammar;
use clap::Parser;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Recursively parses every matching source file under a directory and
/// prints the top-level syntax nodes of each file.
#[derive(Parser)]
struct Options {
    /// Directory to scan.
    root: Utf8PathBuf,

    /// Comma-separated file extensions to parse.
    #[arg(long, value_delimiter = ',', default_values_t = ["c".to_string(), "h".to_string()])]
    ext: Vec<String>,

    /// Render parse diagnostics to stderr.
    #[arg(long)]
    diagnostics: bool,
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    let grammar = Grammar::c();
    let renderer = Renderer::styled();

    for path in collect_files(&options.root, &options.ext)? {
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(error) => {
                eprintln!("cedar: skipping `{path}`: {error}");
                continue;
            }
        };
        let text = String::from_utf8_lossy(&bytes);

        let parse = translation_unit(&text, grammar);

        println!("\nParsed {path}:");
        for node in parse.tree().root().children() {
            println!(" - Node: {}", node.kind().name());
        }

        if options.diagnostics {
            for diagnostic in parse.diagnostics() {
                eprintln!("{}", diagnostic.render(&renderer, path.as_str(), &text));
            }
        }
    }

    Ok(())
}

/// Collects every matching file under `root`, depth first, in path order.
/// Symlinked directories are not descended into, so link cycles cannot trap
/// the walk; unreadable entries are reported and skipped.
fn collect_files(root: &Utf8Path, extensions: &[String]) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut worklist = read_dir_sorted(root).with_context(|| format!("failed to read `{root}`"))?;
    let mut files = Vec::new();

    while let Some(path) = worklist.pop() {
        let file_type = match path.symlink_metadata() {
            Ok(metadata) => metadata.file_type(),
            Err(error) => {
                eprintln!("cedar: skipping `{path}`: {error}");
                continue;
            }
        };

        if file_type.is_dir() {
            match read_dir_sorted(&path) {
                Ok(entries) => worklist.extend(entries),
                Err(error) => eprintln!("cedar: skipping `{path}`: {error}"),
            }
            continue;
        }

        if matches_extension(&path, extensions) {
            files.push(path);
        }
    }

    Ok(files)
}

/// Reverse-sorted, so popping the worklist visits entries in path order.
fn read_dir_sorted(dir: &Utf8Path) -> std::io::Result<Vec<Utf8PathBuf>> {
    let mut entries = Vec::new();
    for entry in dir.read_dir_utf8()? {
        entries.push(entry?.into_path());
    }
    entries.sort();
    entries.reverse();
    Ok(entries)
}

fn matches_extension(path: &Utf8Path, extensions: &[String]) -> bool {
    path.extension().is_some_and(|ext| extensions.iter().any(|e| e == ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn walk_does_not_follow_directory_symlinks() {
        let temp = std::env::temp_dir();
        let root = Utf8PathBuf::from(format!(
            "{}/cedar-walk-{}",
            temp.to_str().unwrap(),
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        let nested = root.join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("a.c"), "int a;\n").unwrap();
        std::fs::write(nested.join("b.h"), "int b;\n").unwrap();
        std::fs::write(nested.join("notes.txt"), "skip\n").unwrap();
        std::os::unix::fs::symlink(&root, nested.join("loop")).unwrap();

        let extensions = ["c".to_string(), "h".to_string()];
        let files = collect_files(&root, &extensions).unwrap();
        let names: Vec<_> = files.iter().map(|path| path.file_name().unwrap()).collect();
        assert_eq!(names, ["a.c", "b.h"]);

        std::fs::remove_dir_all(&root).unwrap();
    }
}
