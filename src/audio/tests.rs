use super::recorder::downmix_into_for_tests as downmix_into;

#[test]
fn mono_input_is_copied_through() {
    let mut buf = Vec::new();
    downmix_into(&mut buf, &[0.1f32, 0.2, 0.3], 1, |s| s);
    assert_eq!(buf, vec![0.1, 0.2, 0.3]);
}

#[test]
fn stereo_frames_are_averaged() {
    let mut buf = Vec::new();
    downmix_into(&mut buf, &[1.0f32, 0.0, 0.5, 0.5], 2, |s| s);
    assert_eq!(buf, vec![0.5, 0.5]);
}

#[test]
fn trailing_partial_frame_is_averaged() {
    let mut buf = Vec::new();
    downmix_into(&mut buf, &[1.0f32, 0.0, 0.8], 2, |s| s);
    assert_eq!(buf.len(), 2);
    assert!((buf[1] - 0.8).abs() < f32::EPSILON);
}

#[test]
fn converter_is_applied_per_sample() {
    let mut buf = Vec::new();
    downmix_into(&mut buf, &[16_384i16, -16_384], 1, |s| s as f32 / 32_768.0);
    assert_eq!(buf, vec![0.5, -0.5]);
}
