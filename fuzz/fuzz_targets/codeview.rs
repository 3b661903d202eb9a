#![no_main]

use libfuzzer_sys::fuzz_target;
use cilpdb::symbols::{CodeViewHeader, ImageDebugDirectory};

fuzz_target!(|data: &[u8]| {
    let directory = ImageDebugDirectory::codeview(data.len() as u32);
    if let Some(header) = CodeViewHeader::parse(&directory, data) {
        assert_eq!(&header.to_bytes()[..], &data[..24]);
    }
});
