use bytes::Bytes;
use filemeta::{extract_field, Error, FieldDescriptor, Multipart, SizeLimit};
use futures_util::stream;

const BOUNDARY: &str = "X-BOUNDARY";

fn single_file_body(headers: &str, content: &str) -> String {
    format!("--X-BOUNDARY\r\n{}\r\n\r\n{}\r\n--X-BOUNDARY--\r\n", headers, content)
}

#[test]
fn test_extract_well_formed_upload() {
    let body = single_file_body(
        "Content-Disposition: form-data; name=\"upfile\"; filename=\"a.txt\"\r\nContent-Type: text/plain",
        "hello",
    );

    let descriptor = extract_field(body.as_bytes(), BOUNDARY, "upfile").unwrap();

    assert_eq!(
        descriptor,
        FieldDescriptor {
            name: "upfile".to_owned(),
            file_name: "a.txt".to_owned(),
            content_type: "text/plain".to_owned(),
            size: 5,
        }
    );
}

#[test]
fn test_extract_missing_field() {
    let body = single_file_body(
        "Content-Disposition: form-data; name=\"document\"; filename=\"a.txt\"",
        "hello",
    );

    assert_eq!(
        extract_field(body.as_bytes(), BOUNDARY, "upfile"),
        Err(Error::FieldNotFound {
            field_name: "upfile".to_owned()
        })
    );
}

#[test]
fn test_extract_missing_filename() {
    let body = single_file_body("Content-Disposition: form-data; name=\"upfile\"", "hello");

    assert!(matches!(
        extract_field(body.as_bytes(), BOUNDARY, "upfile"),
        Err(Error::FilenameNotFound { .. })
    ));
}

#[test]
fn test_extract_without_closing_delimiter() {
    let body = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"upfile\"; filename=\"a.txt\"\r\nContent-Type: text/plain\r\n\r\nhello";

    assert!(matches!(
        extract_field(body.as_bytes(), BOUNDARY, "upfile"),
        Err(Error::InvalidMultipartStructure(_))
    ));
}

#[test]
fn test_extract_twice_gives_same_result() {
    let body = single_file_body(
        "Content-Disposition: form-data; name=\"upfile\"; filename=\"a.txt\"\r\nContent-Type: text/plain",
        "hello",
    );

    assert_eq!(
        extract_field(body.as_bytes(), BOUNDARY, "upfile"),
        extract_field(body.as_bytes(), BOUNDARY, "upfile")
    );
}

#[test]
fn test_line_terminator_before_delimiter_is_not_counted() {
    let body = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"upfile\"; filename=\"c.txt\"\r\n\r\ncontent\r\n--X-BOUNDARY";

    let descriptor = extract_field(body.as_bytes(), BOUNDARY, "upfile").unwrap();
    assert_eq!(descriptor.size, "content".len() as u64);
}

#[test]
fn test_content_with_line_breaks() {
    let body = single_file_body(
        "Content-Disposition: form-data; name=\"upfile\"; filename=\"lines.txt\"\r\nContent-Type: text/plain",
        "Hello world\nHello\r\nWorld\rAgain\r\n",
    );

    let descriptor = extract_field(body.as_bytes(), BOUNDARY, "upfile").unwrap();
    assert_eq!(descriptor.size, 32);
}

#[test]
fn test_default_content_type() {
    let body = single_file_body(
        "Content-Disposition: form-data; name=\"upfile\"; filename=\"a.bin\"",
        "hello",
    );

    let descriptor = extract_field(body.as_bytes(), BOUNDARY, "upfile").unwrap();
    assert_eq!(descriptor.content_type, "application/octet-stream");
}

#[test]
fn test_browser_style_upload() {
    let body = "------WebKitFormBoundary7MA4YWxkTrZu0gW\r\n\
                Content-Disposition: form-data; name=\"description\"\r\n\r\n\
                quarterly report\r\n\
                ------WebKitFormBoundary7MA4YWxkTrZu0gW\r\n\
                Content-Disposition: form-data; name=\"upfile\"; filename=\"report.pdf\"\r\n\
                Content-Type: application/pdf\r\n\r\n\
                %PDF-1.4\r\n\
                ------WebKitFormBoundary7MA4YWxkTrZu0gW--\r\n";

    let boundary = filemeta::parse_boundary("multipart/form-data; boundary=----WebKitFormBoundary7MA4YWxkTrZu0gW").unwrap();
    let descriptor = extract_field(body.as_bytes(), &boundary, "upfile").unwrap();

    assert_eq!(descriptor.file_name, "report.pdf");
    assert_eq!(descriptor.content_type, "application/pdf");
    assert_eq!(descriptor.size, 8);
}

#[test]
fn test_multipart_fields() {
    let data = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"My Field\"\r\n\r\nabcd\r\n--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"File Field\"; filename=\"a-text-file.txt\"\r\nContent-Type: text/plain\r\n\r\nHello world\nHello\r\nWorld\rAgain\r\n--X-BOUNDARY--\r\n";
    let multipart = Multipart::new(data, BOUNDARY);

    for field in multipart.fields().unwrap() {
        if field.index() == 0 {
            assert_eq!(field.name(), Some("My Field"));
            assert_eq!(field.file_name(), None);
            assert_eq!(field.content_type(), None);
            assert_eq!(field.text(), "abcd");
        } else if field.index() == 1 {
            assert_eq!(field.name(), Some("File Field"));
            assert_eq!(field.file_name(), Some("a-text-file.txt"));
            assert_eq!(field.content_type(), Some(&mime::TEXT_PLAIN));
            assert_eq!(field.text(), "Hello world\nHello\r\nWorld\rAgain");
        }
    }

    let descriptor = multipart.extract_field("File Field").unwrap();
    assert_eq!(descriptor.size, 30);
}

#[tokio::test]
async fn test_multipart_from_chunked_stream() {
    let data = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"upfile\"; filename=\"a.txt\"\r\nContent-Type: text/plain\r\n\r\nhello\r\n--X-BOUNDARY--\r\n";
    let stream = stream::iter(
        data.chars()
            .map(|ch| ch.to_string())
            .map(|part| filemeta::Result::Ok(Bytes::copy_from_slice(part.as_bytes()))),
    );

    let multipart = Multipart::from_stream(stream, BOUNDARY, SizeLimit::default()).await.unwrap();

    assert_eq!(multipart.extract_field("upfile").map(|d| d.size), Ok(5));
}

#[tokio::test]
async fn test_multipart_from_stream_size_limit() {
    let data = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"upfile\"; filename=\"a.txt\"\r\n\r\nhello\r\n--X-BOUNDARY--\r\n";
    let stream = stream::iter(
        data.as_bytes()
            .chunks(16)
            .map(|chunk| filemeta::Result::Ok(Bytes::copy_from_slice(chunk))),
    );

    let result = Multipart::from_stream(stream, BOUNDARY, SizeLimit::new().whole_stream(32)).await;

    assert_eq!(result.map(|_| ()), Err(Error::StreamSizeExceeded { limit: 32 }));
}
