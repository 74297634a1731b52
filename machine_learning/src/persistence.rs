//! Saving and loading fitted models.
//!
//! A model file is a small header, a magic tag plus a format version, followed by the model,
//! everything encoded with `bincode`.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{MlErr, Result, linear::LogisticRegression};

const MAGIC: [u8; 4] = *b"PCLR";
const VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u32,
}

/// Writes a fitted model to `path`, replacing the file if it already exists.
pub fn save<P: AsRef<Path>>(model: &LogisticRegression, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    let header = Header {
        magic: MAGIC,
        version: VERSION,
    };
    bincode::serialize_into(&mut writer, &header)?;
    bincode::serialize_into(&mut writer, model)?;
    writer.flush()?;

    debug!("saved model to {}", path.display());
    Ok(())
}

/// Reads a model previously written by `save`.
///
/// # Returns
/// The model or an error if the file can't be read or wasn't written by `save`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<LogisticRegression> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);

    let header: Header = match bincode::deserialize_from(&mut reader) {
        Ok(header) => header,
        Err(e) if is_truncated(&e) => {
            return Err(MlErr::InvalidModelFile(format!(
                "{} is too short to be a model file",
                path.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    if header.magic != MAGIC {
        return Err(MlErr::InvalidModelFile(format!(
            "{} is not a model file",
            path.display()
        )));
    }

    if header.version != VERSION {
        return Err(MlErr::InvalidModelFile(format!(
            "unsupported format version {}, expected {VERSION}",
            header.version
        )));
    }

    let model: LogisticRegression = bincode::deserialize_from(&mut reader)?;
    model.check_layout()?;

    debug!("loaded model from {}", path.display());
    Ok(model)
}

fn is_truncated(e: &bincode::Error) -> bool {
    matches!(e.as_ref(), bincode::ErrorKind::Io(err) if err.kind() == io::ErrorKind::UnexpectedEof)
}
