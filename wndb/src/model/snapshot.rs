//! モデルのスナップショット入出力
//!
//! [`ModelData`] をマジックバイトとアライメント用のパディングに続けて
//! rkyvで直列化します。圧縮は呼び出し側で行います。

use std::io::{Read, Write};

use rkyv::rancor::Error;
use rkyv::util::AlignedVec;
use rkyv::{
    access, api::serialize_using, ser::Serializer, ser::allocator::Arena, ser::sharing::Share,
    ser::writer::IoWriter, util::with_arena,
};

use crate::errors::{Result, WndbError};
use crate::model::{ArchivedModelData, Model, ModelData};

/// WNDBモデルのスナップショットを識別するマジックバイト
pub const MODEL_MAGIC: &[u8] = b"WndbModelRkyv 0.3\n";

const MODEL_MAGIC_LEN: usize = MODEL_MAGIC.len();
const RKYV_ALIGNMENT: usize = 16;
const PADDING_LEN: usize = (RKYV_ALIGNMENT - (MODEL_MAGIC_LEN % RKYV_ALIGNMENT)) % RKYV_ALIGNMENT;

impl Model {
    /// モデルの生データをライターに書き出します。
    ///
    /// # 引数
    ///
    /// * `wtr` - 書き込み先
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合、またはrkyvの直列化に失敗した場合にエラーを返します。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;

        let padding_bytes = vec![0xFF; PADDING_LEN];
        wtr.write_all(&padding_bytes)?;

        with_arena(|arena: &mut Arena| {
            let writer = IoWriter::new(&mut wtr);
            let mut serializer = Serializer::new(writer, arena.acquire(), Share::new());
            serialize_using::<_, Error>(self.data(), &mut serializer)
        })
        .map_err(|e| WndbError::invalid_state("rkyv serialization failed", e.to_string()))?;

        Ok(())
    }

    /// リーダーからスナップショットを読み込み、検証済みのモデルを構築します。
    ///
    /// # 引数
    ///
    /// * `rdr` - 読み込み元
    ///
    /// # エラー
    ///
    /// マジックバイトが一致しない場合、データが破損している場合、
    /// またはモデルの検証に失敗した場合にエラーを返します。
    pub fn read<R: Read>(mut rdr: R) -> Result<Self> {
        let mut magic = [0; MODEL_MAGIC_LEN];
        rdr.read_exact(&mut magic)?;
        if &magic[..] != MODEL_MAGIC {
            return Err(WndbError::invalid_argument(
                "rdr",
                "The magic number of the input model mismatches.",
            ));
        }

        let mut padding_buf = vec![0; PADDING_LEN];
        rdr.read_exact(&mut padding_buf)?;

        let mut buffer = Vec::new();
        rdr.read_to_end(&mut buffer)?;

        let mut aligned_bytes = AlignedVec::<RKYV_ALIGNMENT>::with_capacity(buffer.len());
        aligned_bytes.extend_from_slice(&buffer);

        let archived = access::<ArchivedModelData, Error>(&aligned_bytes).map_err(|e| {
            WndbError::invalid_state(
                "rkyv validation failed. The model file may be corrupted or incompatible.",
                e.to_string(),
            )
        })?;
        let data = rkyv::deserialize::<ModelData, Error>(archived)?;

        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{Lex, ModelBuilder, Sense, Synset, SynsetType};

    #[test]
    fn test_write_read() {
        let model = ModelBuilder::new()
            .synset(
                Synset::new("01", SynsetType::Verb, "verb.motion")
                    .member("run")
                    .definition("move fast")
                    .example("Don't run--you'll be late"),
            )
            .lex(
                Lex::new("run", SynsetType::Verb)
                    .form("ran")
                    .sense(
                        Sense::new("run%2:38:00::", "01")
                            .tag_count(3)
                            .verb_frame("via"),
                    ),
            )
            .verb_template(8, "Sam cannot %s Sue")
            .build()
            .unwrap();

        let mut buf = vec![];
        model.write(&mut buf).unwrap();
        assert!(buf.starts_with(MODEL_MAGIC));

        let other = Model::read(buf.as_slice()).unwrap();
        assert_eq!(other.data(), model.data());
        assert_eq!(other.sense("run%2:38:00::").unwrap().tag_count(), Some(3));
    }

    #[test]
    fn test_magic_mismatch() {
        let buf = b"NotAWndbModel.....................".to_vec();
        assert!(matches!(
            Model::read(buf.as_slice()),
            Err(WndbError::InvalidArgument(_))
        ));
    }
}
