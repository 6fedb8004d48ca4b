use std::io::Cursor;

/// Parses a WAV body and returns its sample count
pub fn assert_wav_body(bytes: &[u8], expected_sample_rate: u32) -> usize {
    let reader = hound::WavReader::new(Cursor::new(bytes)).expect("body should be a WAV file");
    assert_eq!(reader.spec().sample_rate, expected_sample_rate);
    assert_eq!(reader.spec().bits_per_sample, 16);
    reader.len() as usize
}

/// Number of files currently in the artifact directory
pub fn artifact_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .expect("output dir should exist")
        .count()
}
