//! Archive Commands
//!
//! Zip creation and extraction. Entries are stored flat under their
//! base names; extraction recreates the archive's full tree inside
//! the working directory. Archive arguments resolve against the
//! directory cursor, but reports echo the argument as typed.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::commands::CommandContext;
use crate::error::{Error, Result};
use crate::models::OutputRecord;

/// Compress files into a zip archive
///
/// Missing sources get an error record each; the archive is still
/// written with whatever was found.
pub fn zip(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    if args.len() < 2 {
        return Err(Error::InvalidArgument {
            message: "zip requires archive name and files".to_string(),
        });
    }

    let archive_name = &args[0];
    let archive_path = ctx.cursor.resolve(archive_name);
    let sources: Vec<PathBuf> = args[1..].iter().map(|a| ctx.cursor.resolve(a)).collect();

    let mut records = Vec::new();
    if let Err(err) = write_archive(&archive_path, archive_name, &sources, &mut records) {
        records.push(OutputRecord::error(format!(
            "Error creating zip archive: {}",
            err
        )));
    }

    Ok(records)
}

fn write_archive(
    archive_path: &Path,
    archive_name: &str,
    sources: &[PathBuf],
    records: &mut Vec<OutputRecord>,
) -> ZipResult<()> {
    let file = File::create(archive_path)?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for source in sources {
        if !source.is_file() {
            records.push(OutputRecord::error(format!(
                "File not found: {}",
                source.display()
            )));
            continue;
        }

        let entry_name = match source.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        writer.start_file(entry_name, options)?;
        let mut reader = File::open(source)?;
        io::copy(&mut reader, &mut writer)?;

        records.push(OutputRecord::success(format!(
            "Added {} to {}",
            source.display(),
            archive_name
        )));
    }

    writer.finish()?;
    Ok(())
}

/// Extract a zip archive into the working directory
pub fn unzip(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    let archive_name = match args.first() {
        Some(name) => name,
        None => {
            return Err(Error::InvalidArgument {
                message: "unzip requires archive name".to_string(),
            })
        }
    };

    let archive_path = ctx.cursor.resolve(archive_name);
    let destination = ctx.cursor.current().to_path_buf();

    match extract_archive(&archive_path, &destination) {
        Ok(()) => Ok(vec![OutputRecord::success(format!(
            "Extracted {} to {}",
            archive_name,
            destination.display()
        ))]),
        Err(err) => Ok(vec![OutputRecord::error(format!(
            "Error extracting zip archive: {}",
            err
        ))]),
    }
}

fn extract_archive(archive_path: &Path, destination: &Path) -> ZipResult<()> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    archive.extract(destination)
}
