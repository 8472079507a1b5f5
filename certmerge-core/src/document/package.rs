//! DOCX package container: the ZIP parts of a document, kept in archive order

use std::io::{Read, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::error::{DocumentError, DocumentResult};

#[derive(Debug, Clone)]
struct Part {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
}

/// All parts of a DOCX archive held in memory
#[derive(Debug, Clone)]
pub struct DocxPackage {
    parts: Vec<Part>,
}

impl DocxPackage {
    pub fn from_reader<R: Read + Seek>(reader: R) -> DocumentResult<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            // The declared size is untrusted, let the buffer grow as data arrives
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            parts.push(Part {
                name: file.name().to_string(),
                data,
                compression: file.compression(),
            });
        }

        Ok(Self { parts })
    }

    /// Check if a part exists in the package
    pub fn has_part(&self, name: &str) -> bool {
        self.parts.iter().any(|p| p.name == name)
    }

    /// Read a part as UTF-8 text
    pub fn read_string(&self, name: &str) -> DocumentResult<String> {
        let part = self
            .parts
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| DocumentError::MissingPart(name.to_string()))?;
        Ok(String::from_utf8(part.data.clone())?)
    }

    /// Write the package to `writer`, substituting the bytes of overridden parts
    pub fn write_to<W: Write + Seek>(
        &self,
        writer: W,
        overrides: &[(&str, &[u8])],
    ) -> DocumentResult<W> {
        let mut zip_writer = ZipWriter::new(writer);

        for part in &self.parts {
            let data = overrides
                .iter()
                .find(|(name, _)| *name == part.name)
                .map(|(_, data)| *data)
                .unwrap_or(part.data.as_slice());

            // Anything other than stored is re-compressed with deflate
            let method = match part.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = SimpleFileOptions::default().compression_method(method);
            zip_writer.start_file(part.name.as_str(), options)?;
            zip_writer.write_all(data)?;
        }

        Ok(zip_writer.finish()?)
    }
}
