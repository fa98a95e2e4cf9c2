use std::io::Cursor;

use fiff_matrix::{
    read_named_matrix, read_named_matrix_with, transpose_named_matrix, write_named_matrix,
    MatrixError, NamedMatrix, ReadOptions,
};
use fiff_tag::constants::{
    FIFFB_MNE_NAMED_MATRIX, FIFF_MNE_FORWARD_SOLUTION, FIFF_MNE_FORWARD_SOLUTION_GRAD,
    FIFF_MNE_ROW_NAMES,
};
use fiff_tag::{FiffReader, FiffWriter, Node, TagRead, TagWrite};
use ndarray::{array, Array2};

fn setup_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn labelled() -> NamedMatrix {
    NamedMatrix::new(array![
        [1.0f32, -2.5, 3.25, 0.1],
        [f32::EPSILON, 1e-30, -0.0, 7.0],
        [f32::MAX, f32::MIN, 42.0, -1.0 / 3.0],
    ])
    .with_row_names(["MEG 0111", "MEG 0112", "EEG 001"])
    .with_col_names(["s1", "s2", "s3", "s4"])
}

/// Write `mats` (one block each) to a byte stream and return it with its tree.
fn write_all(mats: &[(i32, &NamedMatrix)]) -> (Vec<u8>, Node) {
    let mut w = FiffWriter::new(Vec::new());
    for (kind, mat) in mats {
        write_named_matrix(&mut w, *kind, mat).unwrap();
    }
    w.finish().unwrap()
}

#[test]
fn write_then_read_reproduces_record() {
    setup_logger();
    let original = labelled();
    let (bytes, root) = write_all(&[(FIFF_MNE_FORWARD_SOLUTION, &original)]);

    let mut reader = FiffReader::new(Cursor::new(bytes));
    let read = read_named_matrix_with(&mut reader, &root, FIFF_MNE_FORWARD_SOLUTION, false)
        .unwrap()
        .unwrap();

    assert_eq!(read.nrow, original.nrow);
    assert_eq!(read.ncol, original.ncol);
    assert_eq!(read.row_names, original.row_names);
    assert_eq!(read.col_names, original.col_names);
    let bits = |m: &Array2<f32>| m.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&read.data), bits(&original.data));
}

#[test]
fn reads_from_the_block_node_itself() {
    let original = NamedMatrix::new(array![[1.0f32, 2.0]]);
    let (bytes, root) = write_all(&[(FIFF_MNE_FORWARD_SOLUTION, &original)]);
    let block = &root.children[0];
    assert_eq!(block.block, FIFFB_MNE_NAMED_MATRIX);

    let mut reader = FiffReader::new(Cursor::new(bytes));
    let read = read_named_matrix_with(&mut reader, block, FIFF_MNE_FORWARD_SOLUTION, false)
        .unwrap();
    assert_eq!(read, Some(original));
}

#[test]
fn unlabelled_matrix_round_trips_with_empty_names() {
    let original = NamedMatrix::new(Array2::from_shape_fn((3, 5), |(i, j)| (i * 5 + j) as f32));
    let (bytes, root) = write_all(&[(FIFF_MNE_FORWARD_SOLUTION, &original)]);
    assert!(!root.children[0].has_tag(FIFF_MNE_ROW_NAMES));

    let mut reader = FiffReader::new(Cursor::new(bytes));
    let read = read_named_matrix_with(&mut reader, &root, FIFF_MNE_FORWARD_SOLUTION, false)
        .unwrap()
        .unwrap();
    assert_eq!(read, original);
}

#[test]
fn first_matching_block_wins() {
    let first = NamedMatrix::new(array![[1.0f32]]);
    let grad = NamedMatrix::new(array![[2.0f32, 2.0]]);
    let second = NamedMatrix::new(array![[3.0f32]]);
    let (bytes, root) = write_all(&[
        (FIFF_MNE_FORWARD_SOLUTION_GRAD, &grad),
        (FIFF_MNE_FORWARD_SOLUTION, &first),
        (FIFF_MNE_FORWARD_SOLUTION, &second),
    ]);
    assert_eq!(root.nchild(), 3);

    let mut reader = FiffReader::new(Cursor::new(bytes));
    let read = read_named_matrix_with(&mut reader, &root, FIFF_MNE_FORWARD_SOLUTION, false)
        .unwrap()
        .unwrap();
    assert_eq!(read.data, first.data);

    let read = read_named_matrix_with(&mut reader, &root, FIFF_MNE_FORWARD_SOLUTION_GRAD, false)
        .unwrap()
        .unwrap();
    assert_eq!(read.data, grad.data);
}

#[test]
fn absent_kind_is_none() {
    setup_logger();
    let (bytes, root) = write_all(&[(FIFF_MNE_FORWARD_SOLUTION, &labelled())]);
    let mut reader = FiffReader::new(Cursor::new(bytes));
    let read = read_named_matrix(
        &mut reader,
        &root,
        FIFF_MNE_FORWARD_SOLUTION_GRAD,
        &ReadOptions::default(),
    )
    .unwrap();
    assert!(read.is_none());
}

#[test]
fn nested_two_levels_is_not_found() {
    let mut w = FiffWriter::new(Vec::new());
    w.start_block(101).unwrap();
    write_named_matrix(&mut w, FIFF_MNE_FORWARD_SOLUTION, &labelled()).unwrap();
    w.end_block(101).unwrap();
    let (bytes, root) = w.finish().unwrap();

    let mut reader = FiffReader::new(Cursor::new(bytes));
    assert!(
        read_named_matrix_with(&mut reader, &root, FIFF_MNE_FORWARD_SOLUTION, false)
            .unwrap()
            .is_none()
    );
    // One level down from the wrapper block it is found.
    assert!(
        read_named_matrix_with(&mut reader, &root.children[0], FIFF_MNE_FORWARD_SOLUTION, false)
            .unwrap()
            .is_some()
    );
}

#[test]
fn read_with_transpose_matches_manual_transpose() {
    let original = labelled();
    let (bytes, root) = write_all(&[(FIFF_MNE_FORWARD_SOLUTION, &original)]);
    let mut reader = FiffReader::new(Cursor::new(bytes));
    let read = read_named_matrix_with(&mut reader, &root, FIFF_MNE_FORWARD_SOLUTION, true)
        .unwrap()
        .unwrap();

    let mut expected = original;
    transpose_named_matrix(&mut expected);
    assert_eq!(read, expected);
}

#[test]
fn transposed_record_writes_transposed_payload() {
    let mut mat = labelled();
    mat.transpose();
    let (bytes, root) = write_all(&[(FIFF_MNE_FORWARD_SOLUTION, &mat)]);

    let mut reader = FiffReader::new(Cursor::new(bytes));
    let read = read_named_matrix_with(&mut reader, &root, FIFF_MNE_FORWARD_SOLUTION, false)
        .unwrap()
        .unwrap();
    assert_eq!((read.nrow, read.ncol), (4, 3));
    assert_eq!(read.row_names, vec!["s1", "s2", "s3", "s4"]);
    assert_eq!(read.data, mat.data);
}

#[test]
fn row_count_tag_disagreeing_with_payload_is_rejected() {
    let mut w = FiffWriter::new(Vec::new());
    w.start_block(FIFFB_MNE_NAMED_MATRIX).unwrap();
    w.write_int(fiff_tag::constants::FIFF_MNE_NROW, 5).unwrap();
    w.write_float_matrix(FIFF_MNE_FORWARD_SOLUTION, Array2::<f32>::zeros((3, 4)).view())
        .unwrap();
    w.end_block(FIFFB_MNE_NAMED_MATRIX).unwrap();
    let (bytes, root) = w.finish().unwrap();

    let mut reader = FiffReader::new(Cursor::new(bytes));
    let err = read_named_matrix_with(&mut reader, &root, FIFF_MNE_FORWARD_SOLUTION, false)
        .unwrap_err();
    assert!(matches!(err, MatrixError::DimensionMismatch { tag: 5, actual: 3, .. }));
}

#[test]
fn name_list_delimiter() {
    let mat = NamedMatrix::new(Array2::zeros((3, 1))).with_row_names(["A", "B", "C"]);
    let (bytes, root) = write_all(&[(FIFF_MNE_FORWARD_SOLUTION, &mat)]);

    let mut reader = FiffReader::new(Cursor::new(bytes));
    let block = &root.children[0];
    let tag = reader.find_tag(block, FIFF_MNE_ROW_NAMES).unwrap().unwrap();
    assert_eq!(tag.as_str().unwrap(), "A:B:C");

    let read = read_named_matrix_with(&mut reader, &root, FIFF_MNE_FORWARD_SOLUTION, false)
        .unwrap()
        .unwrap();
    assert_eq!(read.row_names, vec!["A", "B", "C"]);
}
