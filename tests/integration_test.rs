//! Integration tests for huffman-tree-codec

use huffman_tree_codec::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn roundtrip(data: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut encoder = HuffmanTree::new();
    let payload = encoder.compress(data)?;
    let serialized = encoder.serialize_tree();
    let mut decoder = HuffmanTree::new();
    Ok(decoder.decompress(&payload, &serialized)?)
}

#[test]
fn test_abracadabra_lifecycle() -> anyhow::Result<()> {
    let data = b"abracadabra";
    let mut tree = HuffmanTree::new();
    let payload = tree.compress(data)?;

    let codes = tree.codes();
    let a = codes.get(b'a').unwrap().len();
    assert!(a < codes.get(b'c').unwrap().len());
    assert!(a < codes.get(b'd').unwrap().len());
    assert!(codes.is_prefix_free());

    let freq = FrequencyTable::from_bytes(data);
    let expected_bits: usize = freq
        .iter()
        .map(|(s, n)| n as usize * codes.get(s).unwrap().len())
        .sum();
    assert_eq!(payload.len(), expected_bits);

    let serialized = tree.serialize_tree();
    let mut decoder = HuffmanTree::new();
    assert_eq!(decoder.decompress(&payload, &serialized)?, data);
    Ok(())
}

#[test]
fn test_random_roundtrips() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let len = rng.gen_range(1..300);
        let alphabet = rng.gen_range(1..=256usize);
        let data: Vec<u8> = (0..len).map(|_| rng.gen_range(0..alphabet) as u8).collect();
        assert_eq!(roundtrip(&data)?, data);
    }
    Ok(())
}

#[test]
fn test_random_trees_are_prefix_free() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let freq: FrequencyTable = (0..rng.gen_range(1..64))
            .map(|_| (rng.gen::<u8>(), rng.gen_range(1..1000u64)))
            .collect();
        let tree = HuffmanTree::from_frequencies(&freq)?;
        assert_eq!(tree.codes().len(), freq.len());
        assert!(tree.codes().is_prefix_free());
        for (symbol, code) in tree.codes().iter() {
            assert!(freq.get(symbol) > 0);
            assert!(!code.is_empty() && code.bytes().all(|b| b == b'0' || b == b'1'));
        }
    }
    Ok(())
}

#[test]
fn test_shape_survives_serialization() -> anyhow::Result<()> {
    let tree = HuffmanTree::from_bytes(b"she sells sea shells by the sea shore")?;
    let rebuilt = HuffmanTree::from_serialized(&tree.serialize_tree())?;
    assert_eq!(rebuilt.leaf_symbols(), tree.leaf_symbols());
    assert_eq!(rebuilt.codes(), tree.codes());
    Ok(())
}

#[test]
fn test_marker_symbols_roundtrip() -> anyhow::Result<()> {
    let data = b"LLBB\\L\\B bLbBL";
    assert_eq!(roundtrip(data)?, data);
    Ok(())
}

#[test]
fn test_single_symbol_input() -> anyhow::Result<()> {
    let mut tree = HuffmanTree::new();
    let payload = tree.compress(b"aaaa")?;
    assert_eq!(tree.serialize_tree(), b"La".to_vec());
    assert_eq!(payload.len(), 4);
    assert_eq!(roundtrip(b"aaaa")?, b"aaaa");
    Ok(())
}

#[test]
fn test_error_cases() {
    assert_eq!(HuffmanTree::new().compress(b""), Err(CompressError::EmptyInput));

    let err = HuffmanTree::new().decompress("0101", b"").unwrap_err();
    assert!(matches!(err, CompressError::CorruptTreeData(_)));

    let err = HuffmanTree::new().decompress("01", b"LaLbBB").unwrap_err();
    assert!(matches!(err, CompressError::CorruptTreeData(_)));

    let err = HuffmanTree::new().decompress("01", b"LaLbLcBB").unwrap_err();
    assert!(matches!(err, CompressError::MalformedPayload(_)));

    // a symbol may own only one leaf
    let err = HuffmanTree::new().decompress("01", b"LaLaB").unwrap_err();
    assert!(matches!(err, CompressError::CorruptTreeData(_)));
}

#[test]
fn test_compressor_container() -> anyhow::Result<()> {
    let compressor = Compressor::default();
    let data = b"the quick brown fox jumps over the lazy dog".repeat(50);
    let compressed = compressor.compress(&data)?;
    assert!(compressed.ratio < 1.0);

    let restored = CompressedOutput::from_bytes(&compressed.to_bytes()?)?;
    assert_eq!(compressor.decompress(&restored)?, data);
    Ok(())
}

#[test]
fn test_compression_config() -> anyhow::Result<()> {
    let config = CompressionConfig::from_json(r#"{"max_input_size": 16, "verify_roundtrip": true}"#)?;
    let compressor = Compressor::new(config);
    assert!(compressor.compress(b"short enough").is_ok());
    assert!(matches!(
        compressor.compress(b"this input is far too long"),
        Err(CompressError::InputTooLarge { .. })
    ));
    Ok(())
}
