use std::fs;
use std::path::Path;

use crate::config::GrindConfig;
use crate::flags::Flags;
use crate::format::OEWN_HEADER;
use crate::grinder::{Grinder, OFFSET_MAP_FILE};
use crate::model::Pos;
use crate::offsets::OffsetTable;
use crate::record::{PLACEHOLDER_OFFSET, SynsetEncoder};

use super::motor_model;

const OUTPUT_FILES: [&str; 19] = [
    "data.noun",
    "data.verb",
    "data.adj",
    "data.adv",
    "index.noun",
    "index.verb",
    "index.adj",
    "index.adv",
    "index.sense",
    "noun.exc",
    "verb.exc",
    "adj.exc",
    "adv.exc",
    "verb.Framestext",
    "sents.vrb",
    "sentidx.vrb",
    "cntlist",
    "cntlist.rev",
    "lexnames",
];

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

fn with_header(lines: &[&str]) -> String {
    let mut text = OEWN_HEADER.to_string();
    for line in lines {
        text.push_str(line);
    }
    text
}

#[test]
fn test_resolve_offsets() {
    let model = motor_model();
    let offsets = OffsetTable::resolve(&model, &GrindConfig::default()).unwrap();

    assert_eq!(offsets.len(), 7);
    assert_eq!(offsets.get("n-car"), Some(1740));
    assert_eq!(offsets.get("n-vehicle"), Some(1812));
    // the example of n-vehicle holds a two-byte character
    assert_eq!(offsets.get("n-cafe"), Some(1962));
    assert_eq!(offsets.get("v-drive"), Some(1740));
    assert_eq!(offsets.get("v-ride"), Some(1858));
    assert_eq!(offsets.get("a-fast"), Some(1740));
    assert_eq!(offsets.get("r-fast"), Some(1740));
    assert_eq!(offsets.get("n-unknown"), None);
    assert_eq!(offsets.end(Pos::Noun), Some(2014));
    assert_eq!(offsets.end(Pos::Verb), Some(1967));
}

#[test]
fn test_resolve_offsets_compat() {
    let model = motor_model();
    let offsets = OffsetTable::resolve(&model, &GrindConfig::new(Flags::COMPAT)).unwrap();

    // the dropped pointer and frame shorten v-drive and v-ride
    assert_eq!(offsets.get("v-drive"), Some(1740));
    assert_eq!(offsets.get("v-ride"), Some(1839));
    assert_eq!(offsets.get("n-cafe"), Some(1962));
    assert_eq!(offsets.end(Pos::Verb), Some(1940));
}

#[test]
fn test_offsets_increase_within_partition() {
    let model = motor_model();
    let config = GrindConfig::default();
    let offsets = OffsetTable::resolve(&model, &config).unwrap();
    for pos in Pos::ALL {
        let mut previous = None;
        for synset in model.synsets_of(pos) {
            let offset = offsets.get(&synset.synset_id).unwrap();
            assert!(offset >= config.header.len());
            if let Some(previous) = previous {
                assert!(offset > previous);
            }
            previous = Some(offset);
        }
    }
}

#[test]
fn test_placeholder_length() {
    let model = motor_model();
    for flags in [Flags::empty(), Flags::COMPAT] {
        let offsets = OffsetTable::resolve(&model, &GrindConfig::new(flags)).unwrap();
        let placeholder = SynsetEncoder::placeholder(&model, flags);
        let resolved = SynsetEncoder::new(&model, flags, |id| offsets.get(id));
        for synset in model.synsets() {
            let offset = offsets.get(&synset.synset_id).unwrap();
            let then = placeholder.encode(synset, PLACEHOLDER_OFFSET).unwrap();
            let now = resolved.encode(synset, offset).unwrap();
            assert_eq!(then.line.len(), now.line.len(), "{}", synset.synset_id);
        }
    }
}

#[test]
fn test_produce_line() {
    let model = motor_model();
    let grinder = Grinder::new(&model, GrindConfig::default());

    assert_eq!(
        grinder.produce_line("n-car").unwrap(),
        "00001740 06 n 02 car 0 auto 0 001 @ 00001812 n 0000 | a motor vehicle  \n"
    );
    assert_eq!(
        grinder.produce_line("v-drive").unwrap(),
        "00001740 38 v 01 drive 1 002 >^ 00001858 v 0000 + 00001740 n 0101 \
         02 + 02 00 + 08 00 | operate or control a vehicle  \n"
    );
    assert_eq!(
        grinder.produce_line("r-fast").unwrap(),
        "00001740 02 r 01 fast 0 001 \\ 00001740 a 0101 | quickly or rapidly  \n"
    );
    assert!(grinder.produce_line("n-unknown").is_err());
}

#[test]
fn test_produce_line_compat() {
    let model = motor_model();
    let grinder = Grinder::new(&model, GrindConfig::new(Flags::COMPAT));

    assert_eq!(
        grinder.produce_line("v-drive").unwrap(),
        "00001740 38 v 01 drive 1 001 + 00001740 n 0101 \
         02 + 02 00 + 08 00 | operate or control a vehicle  \n"
    );
    assert_eq!(
        grinder.produce_line("v-ride").unwrap(),
        "00001839 38 v 01 ride 0 001 > 00001740 v 0000 \
         01 + 02 00 | be carried or travel on or in a vehicle  \n"
    );
}

#[test]
fn test_compat_violations() {
    let model = motor_model();
    let offsets = OffsetTable::resolve(&model, &GrindConfig::new(Flags::COMPAT)).unwrap();
    let encoder = SynsetEncoder::new(&model, Flags::COMPAT, |id| offsets.get(id));

    let drive = model.synset("v-drive").unwrap();
    let encoded = encoder.encode(drive, 1740).unwrap();
    assert_eq!(encoded.incompats.count("is_caused_by"), 1);
    assert_eq!(encoded.incompats.total(), 1);

    let ride = model.synset("v-ride").unwrap();
    let encoded = encoder.encode(ride, 1839).unwrap();
    assert_eq!(encoded.incompats.count("via-at"), 1);
    assert_eq!(encoded.incompats.total(), 1);
}

#[test]
fn test_grind() {
    let model = motor_model();
    let dir = tempfile::tempdir().unwrap();
    let stats = Grinder::new(&model, GrindConfig::default())
        .grind(dir.path())
        .unwrap();

    assert_eq!(stats.synsets.noun, 3);
    assert_eq!(stats.synsets.verb, 2);
    assert_eq!(stats.synsets.total(), 7);
    assert_eq!(stats.indexes.noun, 4);
    assert_eq!(stats.indexes.total(), 8);
    assert_eq!(stats.senses, 8);
    assert_eq!(stats.morphs.verb, 3);
    assert_eq!(stats.morphs.noun, 0);

    assert_eq!(
        read(dir.path(), "data.noun"),
        with_header(&[
            "00001740 06 n 02 car 0 auto 0 001 @ 00001812 n 0000 | a motor vehicle  \n",
            "00001812 06 n 01 vehicle 0 001 ~ 00001740 n 0000 \
             | a conveyance that transports people or objects; \
             \"vehicles must be registered at the préfecture\"  \n",
            "00001962 06 n 01 café 0 000 | a small restaurant  \n",
        ])
    );
    assert_eq!(
        read(dir.path(), "data.verb"),
        with_header(&[
            "00001740 38 v 01 drive 1 002 >^ 00001858 v 0000 + 00001740 n 0101 \
             02 + 02 00 + 08 00 | operate or control a vehicle  \n",
            "00001858 38 v 01 ride 0 001 > 00001740 v 0000 \
             02 + 02 00 + 36 00 | be carried or travel on or in a vehicle  \n",
        ])
    );
    assert_eq!(
        read(dir.path(), "data.adj"),
        with_header(&["00001740 00 a 01 fast 1 000 | acting or moving quickly  \n"])
    );

    assert_eq!(
        read(dir.path(), "index.noun"),
        with_header(&[
            "auto n 1 1 @ 1 0 00001740  \n",
            "café n 1 0 1 0 00001962  \n",
            "car n 1 1 @ 1 1 00001740  \n",
            "vehicle n 1 1 ~ 1 1 00001812  \n",
        ])
    );
    assert_eq!(
        read(dir.path(), "index.verb"),
        with_header(&[
            "drive v 1 2 + >^ 1 1 00001740  \n",
            "ride v 1 1 > 1 0 00001858  \n",
        ])
    );
    assert_eq!(
        read(dir.path(), "index.adv"),
        with_header(&["fast r 1 1 \\ 1 0 00001740  \n"])
    );
    assert_eq!(
        read(dir.path(), "index.sense"),
        "auto%1:06:00:: 00001740 1 0\n\
         café%1:06:00:: 00001962 1 0\n\
         car%1:06:00:: 00001740 1 12\n\
         drive%2:38:01:: 00001740 1 8\n\
         fast%3:00:01:: 00001740 1 2\n\
         fast%4:02:00:: 00001740 1 0\n\
         ride%2:38:00:: 00001858 1 0\n\
         vehicle%1:06:00:: 00001812 1 5\n"
    );

    assert_eq!(read(dir.path(), "verb.exc"), "driven drive\ndrove drive\nrode ride\n");
    assert_eq!(read(dir.path(), "noun.exc"), "");
    assert_eq!(
        read(dir.path(), "verb.Framestext"),
        "2 Somebody ----s\n8 Somebody ----s something\n36 Somebody ----s at something\n"
    );
    assert_eq!(read(dir.path(), "sents.vrb"), "8 They %s a car\n");
    assert_eq!(read(dir.path(), "sentidx.vrb"), "drive%2:38:01:: 8\n");
    assert_eq!(
        read(dir.path(), "cntlist"),
        "12 car%1:06:00:: 0\n8 drive%2:38:01:: 0\n5 vehicle%1:06:00:: 0\n2 fast%3:00:01:: 0\n"
    );
    assert_eq!(read(dir.path(), "lexnames").lines().count(), 45);
}

#[test]
fn test_grind_compat_index() {
    let model = motor_model();
    let dir = tempfile::tempdir().unwrap();
    Grinder::new(&model, GrindConfig::new(Flags::COMPAT))
        .grind(dir.path())
        .unwrap();

    assert_eq!(
        read(dir.path(), "index.verb"),
        with_header(&[
            "drive v 1 1 + 1 1 00001740  \n",
            "ride v 1 1 > 1 0 00001839  \n",
        ])
    );
}

#[test]
fn test_grind_is_deterministic() {
    let model = motor_model();
    let grinder = Grinder::new(&model, GrindConfig::default());
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    grinder.grind(first.path()).unwrap();
    grinder.grind(second.path()).unwrap();

    // written by grind_offsets only
    assert!(!first.path().join(OFFSET_MAP_FILE).exists());
    for name in OUTPUT_FILES {
        assert_eq!(
            fs::read(first.path().join(name)).unwrap(),
            fs::read(second.path().join(name)).unwrap(),
            "{name}"
        );
    }
}

#[test]
fn test_grind_offsets() {
    let model = motor_model();
    let dir = tempfile::tempdir().unwrap();
    let offsets = Grinder::new(&model, GrindConfig::default())
        .grind_offsets(dir.path())
        .unwrap();

    let text = read(dir.path(), OFFSET_MAP_FILE);
    assert_eq!(
        text,
        "a-fast 1740\n\
         n-cafe 1962\n\
         n-car 1740\n\
         n-vehicle 1812\n\
         r-fast 1740\n\
         v-drive 1740\n\
         v-ride 1858\n"
    );
    let read = OffsetTable::read_map(text.as_bytes()).unwrap();
    assert!(read.iter().eq(offsets.iter()));
    assert_eq!(read.end(Pos::Noun), None);
}
