use crate::collaborators::{MetadataReader, PhotoFile};
use crate::error::EventFinderError;
use crate::structs::{GpsTags, Rational};
use async_trait::async_trait;
use exif::{Exif, Field, In, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tokio::task::spawn_blocking;
use tracing::debug;

/// Reads GPS tags with `kamadak-exif`. Files without an EXIF block yield empty tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifMetadataReader;

#[async_trait]
impl MetadataReader for ExifMetadataReader {
    async fn read_gps_tags(&self, photo: &PhotoFile) -> Result<GpsTags, EventFinderError> {
        let path = photo.path().to_owned();
        spawn_blocking(move || read_gps_tags_from_path(&path)).await?
    }
}

fn read_gps_tags_from_path(path: &Path) -> Result<GpsTags, EventFinderError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => Ok(gps_tags(&exif)),
        Err(
            exif::Error::NotFound(_)
            | exif::Error::NotSupported(_)
            | exif::Error::BlankValue(_)
            | exif::Error::InvalidFormat(_),
        ) => {
            debug!(path = %path.display(), "No EXIF data in photo");
            Ok(GpsTags::default())
        }
        Err(e) => Err(e.into()),
    }
}

fn gps_tags(exif: &Exif) -> GpsTags {
    let field = |tag| exif.get_field(tag, In::PRIMARY);
    GpsTags {
        latitude: field(Tag::GPSLatitude).and_then(rationals),
        latitude_ref: field(Tag::GPSLatitudeRef).and_then(ascii),
        longitude: field(Tag::GPSLongitude).and_then(rationals),
        longitude_ref: field(Tag::GPSLongitudeRef).and_then(ascii),
    }
}

fn rationals(field: &Field) -> Option<Vec<Rational>> {
    match &field.value {
        Value::Rational(values) => Some(
            values
                .iter()
                .map(|r| Rational::new(r.num, r.denom))
                .collect(),
        ),
        _ => None,
    }
}

fn ascii(field: &Field) -> Option<String> {
    match &field.value {
        Value::Ascii(values) => values
            .first()
            .map(|v| String::from_utf8_lossy(v).trim().to_string()),
        _ => None,
    }
}
