use crate::domain::model::ConvertedFile;
use crate::utils::error::{ConvertError, Result};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use reqwest::Client;
use std::io::Cursor;

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

pub const CONVERTED_IMAGE_NAME: &str = "converted_image.png";

/// Downloads an image, refusing bodies larger than `max_bytes`.
pub async fn fetch_image(client: &Client, url: &str, max_bytes: usize) -> Result<Vec<u8>> {
    let fetch_failed = |e: reqwest::Error| ConvertError::FetchFailed {
        message: e.to_string(),
    };

    tracing::info!("Fetching image from URL: {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(fetch_failed)?
        .error_for_status()
        .map_err(fetch_failed)?;

    if let Some(length) = response.content_length() {
        if length > max_bytes as u64 {
            return Err(ConvertError::BadRequest {
                message: format!("Remote image is larger than the {} byte limit", max_bytes),
            });
        }
    }

    let bytes = response.bytes().await.map_err(fetch_failed)?;
    if bytes.len() > max_bytes {
        return Err(ConvertError::BadRequest {
            message: format!("Remote image is larger than the {} byte limit", max_bytes),
        });
    }

    tracing::debug!("Fetched {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

/// Decodes any supported image and re-encodes it as PNG.
///
/// CPU bound; callers on an async runtime should run it on a blocking thread.
pub fn convert_to_png(bytes: &[u8]) -> Result<ConvertedFile> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let source_format = reader.format().ok_or(ConvertError::UnrecognizedImage)?;

    let decoded = reader.decode().map_err(|e| match e {
        ImageError::Decoding(_) | ImageError::Unsupported(_) => ConvertError::UnrecognizedImage,
        other => ConvertError::ImageError(other),
    })?;
    tracing::debug!(
        format = ?source_format,
        width = decoded.width(),
        height = decoded.height(),
        "image decoded"
    );

    let mut output = Cursor::new(Vec::new());
    flatten_for_png(decoded).write_to(&mut output, ImageFormat::Png)?;

    Ok(ConvertedFile {
        filename: CONVERTED_IMAGE_NAME.to_string(),
        mime_type: "image/png",
        bytes: output.into_inner(),
    })
}

/// Drops alpha and unusual sample types so the output is plain RGB (or grey).
fn flatten_for_png(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageRgb16(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, Rgba, RgbaImage};

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_rgba_png_is_flattened_to_rgb() {
        let rgba = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 128]));
        let input = encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Png);

        let converted = convert_to_png(&input).unwrap();
        assert_eq!(converted.mime_type, "image/png");
        assert_eq!(converted.filename, CONVERTED_IMAGE_NAME);

        let decoded = image::load_from_memory(&converted.bytes).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb8);
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }

    #[test]
    fn test_gif_is_converted() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let input = encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Gif);

        let converted = convert_to_png(&input).unwrap();
        let format = image::guess_format(&converted.bytes).unwrap();
        assert_eq!(format, ImageFormat::Png);
    }

    #[test]
    fn test_garbage_is_unrecognized() {
        let result = convert_to_png(b"definitely not an image");
        assert!(matches!(result, Err(ConvertError::UnrecognizedImage)));
    }

    #[test]
    fn test_truncated_png_is_unrecognized() {
        let rgba = RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255]));
        let input = encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Png);
        let truncated = &input[..input.len() / 2];

        assert!(convert_to_png(truncated).is_err());
    }
}
