#![no_main]

use filemeta::bytes::Bytes;
use filemeta::Multipart;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = filemeta::extract_field(data, "X-BOUNDARY", "upfile");

    let multipart = Multipart::new(Bytes::copy_from_slice(data), "X-BOUNDARY");
    if let Ok(fields) = multipart.fields() {
        for field in fields {
            let _ = field.text();
        }
    }
});
