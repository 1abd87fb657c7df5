//! Test fixtures: PNG/PDF/MP4 blobs.

/// A structurally valid PNG padded with an ancillary chunk to roughly `size` bytes.
pub fn create_test_png(size: usize) -> Vec<u8> {
    let mut png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    // IHDR for a 1x1 RGB image
    png.extend_from_slice(&13u32.to_be_bytes());
    png.extend_from_slice(b"IHDR");
    png.extend_from_slice(&1u32.to_be_bytes());
    png.extend_from_slice(&1u32.to_be_bytes());
    png.extend_from_slice(&[8, 2, 0, 0, 0]);
    png.extend_from_slice(&[0x90, 0x77, 0x53, 0xDE]);

    let padding = size.saturating_sub(png.len() + 12 + 12);
    png.extend_from_slice(&(padding as u32).to_be_bytes());
    png.extend_from_slice(b"tEXt");
    png.extend(std::iter::repeat(b'a').take(padding));
    png.extend_from_slice(&[0, 0, 0, 0]);

    png.extend_from_slice(&0u32.to_be_bytes());
    png.extend_from_slice(b"IEND");
    png.extend_from_slice(&0xAE426082u32.to_be_bytes());
    png
}

/// Minimal PDF header and trailer.
pub fn create_test_pdf() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n"
        .to_vec()
}

/// An MP4-looking blob of `size` bytes starting with an `ftyp` box.
pub fn create_test_mp4(size: usize) -> Vec<u8> {
    let mut mp4 = Vec::with_capacity(size.max(24));
    mp4.extend_from_slice(&24u32.to_be_bytes());
    mp4.extend_from_slice(b"ftypisom");
    mp4.extend_from_slice(&[0, 0, 2, 0]);
    mp4.extend_from_slice(b"isomiso2");
    mp4.resize(size.max(24), 0);
    mp4
}
