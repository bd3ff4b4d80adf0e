use crate::features::error::DataUrlError;
use base64::{Engine as _, engine::general_purpose};
use image::ImageFormat;
use mime_guess::MimeGuess;
use std::io::Cursor;
use std::path::Path;

/// Downscales an image to fit `max_size` and encodes it as a JPEG data URL.
pub fn file_to_data_url<P: AsRef<Path>>(
    path: P,
    max_size: (u32, u32),
) -> Result<String, DataUrlError> {
    let path = path.as_ref();
    let mime = MimeGuess::from_path(path).first_or_octet_stream();

    if mime.type_() != "image" {
        return Err(DataUrlError::UnsupportedFileType(mime.to_string()));
    }

    let img = image::open(path)?;
    // JPEG has no alpha channel.
    let preview = img.thumbnail(max_size.0, max_size.1).into_rgb8();
    let mut bytes = Cursor::new(Vec::new());
    preview.write_to(&mut bytes, ImageFormat::Jpeg)?;
    let b64 = general_purpose::STANDARD.encode(bytes.into_inner());
    Ok(format!("data:image/jpeg;base64,{b64}"))
}
