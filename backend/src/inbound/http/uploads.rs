//! Multipart reading for the image endpoints.

use actix_multipart::{Multipart, MultipartError};
use futures_util::StreamExt;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::ImageUpload;

/// Form field that carries the image file.
const FILE_FIELD: &str = "file";

/// Schema of the multipart form accepted by the image endpoints.
#[derive(Debug, ToSchema)]
pub struct ImageUploadForm {
    /// Image file content. Endpoints that allow a reset accept an absent or
    /// empty file.
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: Vec<u8>,
}

/// Read the image file out of a multipart request.
///
/// Returns `None` when the request carries no `file` field or the file has no
/// content. The profile and cover endpoints treat that as a reset to the
/// default image; the gallery endpoint rejects it.
pub(crate) async fn read_image_upload(
    payload: &mut Multipart,
) -> Result<Option<ImageUpload>, Error> {
    while let Some(field) = payload.next().await {
        let mut field = field.map_err(bad_multipart)?;
        if field.name() != Some(FILE_FIELD) {
            // Drain the unrelated field so the stream stays readable.
            while let Some(chunk) = field.next().await {
                chunk.map_err(bad_multipart)?;
            }
            continue;
        }

        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .unwrap_or_default()
            .to_owned();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(bad_multipart)?;
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Ok(None);
        }
        return Ok(Some(ImageUpload { file_name, bytes }));
    }

    Ok(None)
}

fn bad_multipart(error: MultipartError) -> Error {
    debug!(%error, "rejecting unreadable multipart payload");
    Error::single("File", "File is required.")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::error::PayloadError;
    use actix_web::http::header::{self, HeaderMap};
    use actix_web::web::Bytes;
    use futures_util::stream;

    use super::*;

    const BOUNDARY: &str = "abbc761f78ff4d7cb7573b5a23f96ef0";

    fn multipart(body: String) -> Multipart {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}")
                .parse()
                .expect("valid content type"),
        );
        let payload = stream::iter([Ok::<Bytes, PayloadError>(Bytes::from(body))]);
        Multipart::new(&headers, payload)
    }

    fn file_part(file_name: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: image/png\r\n\r\n\
             {content}\r\n"
        )
    }

    fn closing() -> String {
        format!("--{BOUNDARY}--\r\n")
    }

    #[actix_web::test]
    async fn file_field_becomes_an_upload() {
        let mut payload = multipart(file_part("photo.png", "png-bytes") + &closing());

        let upload = read_image_upload(&mut payload)
            .await
            .expect("well formed payload")
            .expect("a file was sent");

        assert_eq!(upload.file_name, "photo.png");
        assert_eq!(upload.bytes, b"png-bytes");
    }

    #[actix_web::test]
    async fn unrelated_fields_are_skipped() {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"caption\"\r\n\r\n\
             holiday photo\r\n{}{}",
            file_part("photo.jpg", "jpg-bytes"),
            closing()
        );
        let mut payload = multipart(body);

        let upload = read_image_upload(&mut payload)
            .await
            .expect("well formed payload")
            .expect("a file was sent");

        assert_eq!(upload.file_name, "photo.jpg");
    }

    #[actix_web::test]
    async fn missing_file_field_reads_as_none() {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"caption\"\r\n\r\n\
             holiday photo\r\n{}",
            closing()
        );
        let mut payload = multipart(body);

        let upload = read_image_upload(&mut payload)
            .await
            .expect("well formed payload");

        assert!(upload.is_none());
    }

    #[actix_web::test]
    async fn empty_file_content_reads_as_none() {
        let mut payload = multipart(file_part("photo.png", "") + &closing());

        let upload = read_image_upload(&mut payload)
            .await
            .expect("well formed payload");

        assert!(upload.is_none());
    }
}
