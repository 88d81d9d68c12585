use lane_image::{ImageError, PixelGrid, decode_image, encode_png};

#[test]
fn test_png_keeps_overlay_pixels() {
    let mut data = vec![0u8; 4 * 2 * 4];
    data[4..8].copy_from_slice(&[0, 255, 0, 255]);
    let overlay = PixelGrid::new(4, 2, 4, data).unwrap();

    let png = encode_png(&overlay).unwrap();
    assert_eq!(&png[1..4], b"PNG");

    // decode_image returns RGB, so the transparent pixels come back black
    let decoded = decode_image(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height(), decoded.channels()), (4, 2, 3));
    assert_eq!(decoded.pixel(1, 0), &[0, 255, 0]);
    assert_eq!(decoded.pixel(0, 0), &[0, 0, 0]);
}

#[test]
fn test_decode_garbage_fails() {
    let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
    assert!(matches!(result, Err(ImageError::Decode(_))));
}

#[test]
fn test_encode_empty_fails() {
    let empty = PixelGrid::new(0, 0, 3, vec![]).unwrap();
    assert!(encode_png(&empty).is_err());
}
