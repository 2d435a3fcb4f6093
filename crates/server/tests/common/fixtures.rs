//! Shared test fixtures.

use curio_core::ContentHash;

/// Lowercase hex SHA-256 of `data`.
#[allow(dead_code)]
pub fn sha256_hex(data: &[u8]) -> String {
    ContentHash::compute(data).to_hex()
}

/// Boundary used by [`multipart_body`].
#[allow(dead_code)]
pub const BOUNDARY: &str = "curio-test-boundary";

/// Build a multipart/form-data body for the POST /items endpoint.
///
/// Returns the Content-Type header value and the encoded body.
#[allow(dead_code)]
pub fn multipart_body(name: &str, category: &str, image: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (field, value) in [("name", name.as_bytes()), ("category", category.as_bytes())] {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"image\"; filename=\"upload.jpg\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
    body.extend_from_slice(image);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// A multipart body with one of the required fields left out.
#[allow(dead_code)]
pub fn multipart_body_without(missing: &str, image: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (field, value) in [("name", "Bicycle"), ("category", "Sports")] {
        if field == missing {
            continue;
        }
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if missing != "image" {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"image\"; filename=\"upload.jpg\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
