//! wndbのテストモジュール群
//!
//! オフセット解決からファイル出力まで、複数のコンポーネントを通した
//! 動作を検証するテストを含みます。

mod grind;
mod numbering;

use crate::model::{Lex, Model, ModelBuilder, Sense, Synset, SynsetType};

/// 名詞3件、動詞2件、形容詞と副詞を1件ずつ含む小さなモデル
fn motor_model() -> Model {
    ModelBuilder::new()
        .synset(
            Synset::new("n-car", SynsetType::Noun, "noun.artifact")
                .member("car")
                .member("auto")
                .definition("a motor vehicle")
                .relation("hypernym", ["n-vehicle"]),
        )
        .synset(
            Synset::new("n-vehicle", SynsetType::Noun, "noun.artifact")
                .member("vehicle")
                .definition("a conveyance that transports people or objects")
                .example("vehicles must be registered at the préfecture")
                .relation("hyponym", ["n-car"]),
        )
        .synset(
            Synset::new("n-cafe", SynsetType::Noun, "noun.artifact")
                .member("café")
                .definition("a small restaurant"),
        )
        .synset(
            Synset::new("v-drive", SynsetType::Verb, "verb.motion")
                .member("drive")
                .definition("operate or control a vehicle")
                .relation("is_caused_by", ["v-ride"]),
        )
        .synset(
            Synset::new("v-ride", SynsetType::Verb, "verb.motion")
                .member("ride")
                .definition("be carried or travel on or in a vehicle")
                .relation("causes", ["v-drive"]),
        )
        .synset(
            Synset::new("a-fast", SynsetType::Adj, "adj.all")
                .member("fast")
                .definition("acting or moving quickly"),
        )
        .synset(
            Synset::new("r-fast", SynsetType::Adv, "adv.all")
                .member("fast")
                .definition("quickly or rapidly"),
        )
        .lex(Lex::new("car", SynsetType::Noun).sense(Sense::new("car%1:06:00::", "n-car").tag_count(12)))
        .lex(Lex::new("auto", SynsetType::Noun).sense(Sense::new("auto%1:06:00::", "n-car")))
        .lex(
            Lex::new("vehicle", SynsetType::Noun)
                .sense(Sense::new("vehicle%1:06:00::", "n-vehicle").tag_count(5)),
        )
        .lex(Lex::new("café", SynsetType::Noun).sense(Sense::new("café%1:06:00::", "n-cafe")))
        .lex(
            Lex::new("drive", SynsetType::Verb).form("drove").form("driven").sense(
                Sense::new("drive%2:38:01::", "v-drive")
                    .tag_count(8)
                    .verb_frame("vtai")
                    .verb_frame("via")
                    .verb_template(8)
                    .relation("derivation", ["car%1:06:00::", "car%1:06:00::"]),
            ),
        )
        .lex(
            Lex::new("ride", SynsetType::Verb).form("rode").sense(
                Sense::new("ride%2:38:00::", "v-ride")
                    .verb_frame("via")
                    .verb_frame("via-at"),
            ),
        )
        .lex(Lex::new("fast", SynsetType::Adj).sense(Sense::new("fast%3:00:01::", "a-fast").tag_count(2)))
        .lex(
            Lex::new("fast", SynsetType::Adv)
                .sense(Sense::new("fast%4:02:00::", "r-fast").relation("pertainym", ["fast%3:00:01::"])),
        )
        .verb_frame("via", "Somebody ----s")
        .verb_frame("vtai", "Somebody ----s something")
        .verb_frame("via-at", "Somebody ----s at something")
        .verb_template(8, "They %s a car")
        .build()
        .unwrap()
}

/// 同じ見出し語が複数のシンセットと大文字小文字の異なる語彙単位に現れるモデル
fn bank_model() -> Model {
    ModelBuilder::new()
        .synset(
            Synset::new("b-slope", SynsetType::Noun, "noun.object")
                .member("bank")
                .definition("sloping land beside a body of water"),
        )
        .synset(
            Synset::new("b-finance", SynsetType::Noun, "noun.group")
                .member("bank")
                .definition("a financial institution"),
        )
        .synset(
            Synset::new("b-proper", SynsetType::Noun, "noun.group")
                .member("Bank")
                .definition("a fictional organization"),
        )
        .lex(
            Lex::new("bank", SynsetType::Noun)
                .sense(Sense::new("bank%1:17:01::", "b-slope"))
                .sense(Sense::new("bank%1:14:00::", "b-finance").tag_count(20)),
        )
        .lex(Lex::new("Bank", SynsetType::Noun).sense(Sense::new("Bank%1:14:02::", "b-proper")))
        .build()
        .unwrap()
}
