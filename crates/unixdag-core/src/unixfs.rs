//! UnixFS metadata carried in the data section of dag-pb nodes.
//!
//! The protobuf schema is proto2; prost writes fields in tag order, which is
//! the canonical order other UnixFS implementations produce.

use prost::Message;

use crate::error::{CoreError, Result};

/// Protobuf messages of the UnixFS schema.
pub mod pb {
    /// The UnixFS `Data` message.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Data {
        #[prost(enumeration = "DataType", required, tag = "1")]
        pub r#type: i32,
        #[prost(bytes = "vec", optional, tag = "2")]
        pub data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        #[prost(uint64, optional, tag = "3")]
        pub filesize: ::core::option::Option<u64>,
        #[prost(uint64, repeated, packed = "false", tag = "4")]
        pub blocksizes: ::prost::alloc::vec::Vec<u64>,
        #[prost(uint64, optional, tag = "5")]
        pub hash_type: ::core::option::Option<u64>,
        #[prost(uint64, optional, tag = "6")]
        pub fanout: ::core::option::Option<u64>,
        #[prost(uint32, optional, tag = "7")]
        pub mode: ::core::option::Option<u32>,
        #[prost(message, optional, tag = "8")]
        pub mtime: ::core::option::Option<UnixTime>,
    }

    /// Modification time.
    #[derive(Clone, Copy, PartialEq, ::prost::Message)]
    pub struct UnixTime {
        #[prost(int64, required, tag = "1")]
        pub seconds: i64,
        #[prost(fixed32, optional, tag = "2")]
        pub fractional_nanoseconds: ::core::option::Option<u32>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum DataType {
        Raw = 0,
        Directory = 1,
        File = 2,
        Metadata = 3,
        Symlink = 4,
        HamtShard = 5,
    }
}

pub use pb::{DataType, UnixTime};

/// A parsed UnixFS node.
#[derive(Debug, Clone, PartialEq)]
pub struct FsNode {
    format: pb::Data,
}

impl FsNode {
    /// A new, empty node of the given type.
    pub fn new(data_type: DataType) -> Self {
        Self {
            format: pb::Data {
                r#type: data_type as i32,
                ..Default::default()
            },
        }
    }

    /// Parse a node from the data section of a dag-pb node.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(CoreError::Decode("missing required unixfs field: Type".into()));
        }
        let format = pb::Data::decode(bytes)?;
        DataType::try_from(format.r#type)
            .map_err(|_| CoreError::Decode(format!("unknown unixfs type: {}", format.r#type)))?;
        Ok(Self { format })
    }

    /// Serialize, recording the current file size.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut format = self.format.clone();
        format.filesize = Some(self.file_size());
        format.encode_to_vec()
    }

    pub fn data_type(&self) -> DataType {
        DataType::try_from(self.format.r#type).unwrap_or(DataType::Raw)
    }

    /// Total bytes of file content below and inside this node.
    pub fn file_size(&self) -> u64 {
        self.data().len() as u64 + self.format.blocksizes.iter().sum::<u64>()
    }

    /// Inline file data.
    pub fn data(&self) -> &[u8] {
        self.format.data.as_deref().unwrap_or_default()
    }

    pub fn set_data(&mut self, data: Vec<u8>) {
        self.format.data = if data.is_empty() { None } else { Some(data) };
    }

    /// File size of each child, in link order.
    pub fn block_sizes(&self) -> &[u64] {
        &self.format.blocksizes
    }

    pub fn add_block_size(&mut self, size: u64) {
        self.format.blocksizes.push(size);
    }

    pub fn mode(&self) -> Option<u32> {
        self.format.mode
    }

    pub fn set_mode(&mut self, mode: u32) {
        self.format.mode = Some(mode);
    }

    pub fn mtime(&self) -> Option<UnixTime> {
        self.format.mtime
    }

    pub fn set_mtime(&mut self, seconds: i64, nanos: Option<u32>) {
        self.format.mtime = Some(UnixTime {
            seconds,
            fractional_nanoseconds: nanos,
        });
    }
}
