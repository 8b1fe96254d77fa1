//! File Viewing Commands
//!
//! Content display for the `cat` builtin. Reads are lossy: invalid
//! UTF-8 sequences are replaced rather than refused, so binary-ish
//! files still render something.

use crate::commands::CommandContext;
use crate::error::{Error, Result};
use crate::models::OutputRecord;

/// Print a file's contents between banner lines
pub fn cat_file(args: &[String], ctx: &mut CommandContext) -> Result<Vec<OutputRecord>> {
    let name = match args.first() {
        Some(name) => name,
        None => {
            return Err(Error::InvalidArgument {
                message: "cat requires a file name".to_string(),
            })
        }
    };

    let path = ctx.cursor.resolve(name);
    if !path.is_file() {
        return Err(Error::NotAFile { path });
    }

    let bytes = std::fs::read(&path).map_err(|err| Error::from_io_at(err, path.clone()))?;
    let content = String::from_utf8_lossy(&bytes).into_owned();

    Ok(vec![
        OutputRecord::plain(format!("--- Contents of {} ---", path.display())),
        OutputRecord::plain(content),
        OutputRecord::plain(format!("--- End of {} ---", path.display())),
    ])
}
