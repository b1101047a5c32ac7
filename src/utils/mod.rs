mod node;
pub(crate) use node::{
    Link, Node, balance_factor, max_key, min_key, rotate_left, rotate_right, verify_subtree,
};

mod reader;
pub(crate) use reader::ByteReader;
