//! End-to-end document tests: building, validation failures, choice
//! backtracking, serialization and round-trips.

use musicxml::error::Error;
use musicxml::{parse_musicxml, parse_musicxml_str, XmlElement, XmlValue, WriteOptions};

// =============================================================================
// Building and serializing
// =============================================================================

#[test]
fn test_pitch_build() {
    let pitch = XmlElement::new("pitch").unwrap();
    pitch
        .add_child(XmlElement::new_with_value("step", "G").unwrap())
        .unwrap();
    pitch.set_child_value("octave", 3).unwrap();

    assert_eq!(
        pitch.to_string().unwrap(),
        "<pitch>\n  <step>G</step>\n  <octave>3</octave>\n</pitch>\n"
    );
}

#[test]
fn test_enum_rejection() {
    let err = XmlElement::new_with_value("step", "H").unwrap_err();
    match err {
        Error::BadValue {
            type_name,
            value,
            reason,
        } => {
            assert_eq!(type_name, "step");
            assert_eq!(value, "H");
            assert_eq!(reason, "not in enumeration");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_missing_required_child() {
    let pitch = XmlElement::new("pitch").unwrap();
    let err = pitch.to_string().unwrap_err();
    match err {
        Error::RequiredChildMissing {
            element,
            particle_path,
        } => {
            assert_eq!(element, "pitch");
            assert_eq!(particle_path, "step");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_attribute_validation() {
    let part_name = XmlElement::new_with_value("part-name", "Flute")
        .unwrap()
        .with_attribute("font-family", "Arial")
        .unwrap()
        .with_attribute("font-size", 17.2)
        .unwrap();

    assert_eq!(
        part_name.to_string().unwrap(),
        "<part-name font-family=\"Arial\" font-size=\"17.2\">Flute</part-name>\n"
    );

    let err = part_name.set_attribute("font-size", "huge").unwrap_err();
    assert!(matches!(err, Error::BadValue { .. }));
}

#[test]
fn test_articulations_choice_duplicates() {
    let articulations = XmlElement::new("articulations").unwrap();
    articulations
        .add_child(XmlElement::new("accent").unwrap())
        .unwrap();
    articulations
        .add_child(XmlElement::new("staccato").unwrap())
        .unwrap();
    articulations
        .add_child(XmlElement::new("accent").unwrap())
        .unwrap();

    assert_eq!(
        articulations.to_string().unwrap(),
        "<articulations>\n  <accent />\n  <staccato />\n  <accent />\n</articulations>\n"
    );
}

#[test]
fn test_xsd_check_off_literal_order() {
    let pitch = XmlElement::new("pitch").unwrap().with_xsd_check(false);
    pitch
        .add_child(XmlElement::new_with_value("step", "G").unwrap())
        .unwrap();
    pitch
        .add_child(XmlElement::new_with_value("alter", 1).unwrap())
        .unwrap();
    pitch
        .add_child(XmlElement::new_with_value("octave", 3).unwrap())
        .unwrap();

    assert_eq!(
        pitch.to_string().unwrap(),
        "<pitch>\n  <step>G</step>\n  <alter>1</alter>\n  <octave>3</octave>\n</pitch>\n"
    );
}

#[test]
fn test_xsd_check_off_accepts_anything() {
    let part_list = XmlElement::new("part-list").unwrap().with_xsd_check(false);
    assert_eq!(part_list.to_string().unwrap(), "<part-list />\n");

    part_list
        .add_child(
            XmlElement::new("score-part")
                .unwrap()
                .with_xsd_check(false)
                .with_attribute("id", "p-1")
                .unwrap(),
        )
        .unwrap();
    let part_group = part_list
        .add_child(
            XmlElement::new("part-group")
                .unwrap()
                .with_attribute("type", "start")
                .unwrap()
                .with_attribute("number", "1")
                .unwrap(),
        )
        .unwrap();
    part_group
        .add_child(XmlElement::new_with_value("group-symbol", "square").unwrap())
        .unwrap();
    part_group
        .add_child(XmlElement::new_with_value("group-barline", "yes").unwrap())
        .unwrap();

    let expected = "<part-list>\n  <score-part id=\"p-1\" />\n  <part-group type=\"start\" number=\"1\">\n    <group-symbol>square</group-symbol>\n    <group-barline>yes</group-barline>\n  </part-group>\n</part-list>\n";
    assert_eq!(part_list.to_string().unwrap(), expected);
}

// =============================================================================
// Choice backtracking
// =============================================================================

#[test]
fn test_single_choice_rejects_second_branch() {
    // time is (beats, beat-type)+ | senza-misura
    let time = XmlElement::new("time").unwrap();
    time.set_child_value("beats", "4").unwrap();
    time.set_child_value("beat-type", "4").unwrap();

    let err = time
        .add_child(XmlElement::new_with_value("senza-misura", "X").unwrap())
        .unwrap_err();
    match err {
        Error::ChildNotAllowed { element, child, .. } => {
            assert_eq!(element, "time");
            assert_eq!(child, "senza-misura");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    // the rejected add left the tree untouched
    assert_eq!(time.get_children(true).len(), 2);
    assert!(time.final_checks().is_ok());
}

#[test]
fn test_choice_retry_before_commitment() {
    // senza-misura is only reachable via the second branch of time's choice
    let time = XmlElement::new("time").unwrap();
    time.add_child(XmlElement::new_with_value("senza-misura", "senza").unwrap())
        .unwrap();
    assert_eq!(
        time.to_string().unwrap(),
        "<time>\n  <senza-misura>senza</senza-misura>\n</time>\n"
    );
}

#[test]
fn test_time_signature_sequence_duplication() {
    // (beats, beat-type) with maxOccurs unbounded: the third add opens a
    // second duplicate and output shows the groups adjacent and in order
    let time = XmlElement::new("time").unwrap();
    time.add_child(XmlElement::new_with_value("beats", "3").unwrap())
        .unwrap();
    time.add_child(XmlElement::new_with_value("beat-type", "4").unwrap())
        .unwrap();
    time.add_child(XmlElement::new_with_value("beats", "2").unwrap())
        .unwrap();

    // second occurrence is incomplete until its beat-type arrives
    let err = time.to_string().unwrap_err();
    match err {
        Error::RequiredChildMissing { particle_path, .. } => {
            assert_eq!(particle_path, "beat-type")
        }
        other => panic!("unexpected error: {:?}", other),
    }

    time.add_child(XmlElement::new_with_value("beat-type", "8").unwrap())
        .unwrap();
    assert_eq!(
        time.to_string().unwrap(),
        "<time>\n  <beats>3</beats>\n  <beat-type>4</beat-type>\n  <beats>2</beats>\n  <beat-type>8</beat-type>\n</time>\n"
    );
}

#[test]
fn test_key_choice_of_groups() {
    let key = XmlElement::new("key").unwrap();
    key.set_child_value("fifths", 2).unwrap();
    key.set_child_value("mode", "major").unwrap();
    assert_eq!(
        key.to_string().unwrap(),
        "<key>\n  <fifths>2</fifths>\n  <mode>major</mode>\n</key>\n"
    );

    // the other branch: a committed non-traditional key rejects fifths
    let key = XmlElement::new("key").unwrap();
    key.set_child_value("key-step", "C").unwrap();
    key.set_child_value("key-alter", 1).unwrap();
    assert!(key
        .add_child(XmlElement::new_with_value("fifths", 2).unwrap())
        .is_err());
    assert!(key.final_checks().is_ok());
}

#[test]
fn test_note_picks_plain_branch() {
    // the grace and cue branches of note's leading choice reject pitch at
    // their unsatisfied leading leaf, so pitch commits the plain branch
    let note = XmlElement::new("note").unwrap();
    note.add_child(XmlElement::new("pitch").unwrap()).unwrap();
    note.child("pitch").unwrap().set_child_value("step", "C").unwrap();
    note.child("pitch").unwrap().set_child_value("octave", 4).unwrap();
    note.set_child_value("duration", 4).unwrap();
    note.set_child_value("voice", "1").unwrap();
    note.set_child_value("type", "whole").unwrap();

    let expected = "<note>\n  <pitch>\n    <step>C</step>\n    <octave>4</octave>\n  </pitch>\n  <duration>4</duration>\n  <voice>1</voice>\n  <type>whole</type>\n</note>\n";
    assert_eq!(note.to_string().unwrap(), expected);
}

#[test]
fn test_note_missing_duration_diagnostic() {
    // the committed plain branch names its own missing leaf, not a leaf
    // from the untouched grace branch
    let note = XmlElement::new("note").unwrap();
    let pitch = note.add_child(XmlElement::new("pitch").unwrap()).unwrap();
    pitch.set_child_value("step", "C").unwrap();
    pitch.set_child_value("octave", 4).unwrap();

    let err = note.to_string().unwrap_err();
    match err {
        Error::RequiredChildMissing {
            element,
            particle_path,
        } => {
            assert_eq!(element, "note");
            assert_eq!(particle_path, "duration");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_grace_note_build() {
    let note = XmlElement::new("note").unwrap();
    note.add_child(XmlElement::new("grace").unwrap()).unwrap();
    let pitch = note.add_child(XmlElement::new("pitch").unwrap()).unwrap();
    pitch.set_child_value("step", "D").unwrap();
    pitch.set_child_value("octave", 5).unwrap();

    let expected = "<note>\n  <grace />\n  <pitch>\n    <step>D</step>\n    <octave>5</octave>\n  </pitch>\n</note>\n";
    assert_eq!(note.to_string().unwrap(), expected);
}

#[test]
fn test_cue_note_build() {
    let note = XmlElement::new("note").unwrap();
    note.add_child(XmlElement::new("cue").unwrap()).unwrap();
    let pitch = note.add_child(XmlElement::new("pitch").unwrap()).unwrap();
    pitch.set_child_value("step", "E").unwrap();
    pitch.set_child_value("octave", 4).unwrap();
    note.set_child_value("duration", 2).unwrap();

    let expected = "<note>\n  <cue />\n  <pitch>\n    <step>E</step>\n    <octave>4</octave>\n  </pitch>\n  <duration>2</duration>\n</note>\n";
    assert_eq!(note.to_string().unwrap(), expected);
}

#[test]
fn test_children_must_arrive_in_content_model_order() {
    // octave cannot pass the unsatisfied step particle
    let pitch = XmlElement::new("pitch").unwrap();
    let err = pitch
        .add_child(XmlElement::new_with_value("octave", 3).unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::ChildNotAllowed { .. }));
    assert!(pitch.get_children(true).is_empty());

    pitch.set_child_value("step", "G").unwrap();
    pitch.set_child_value("octave", 3).unwrap();
    // the optional alter slot between them is still reachable
    pitch.set_child_value("alter", 1).unwrap();
    let names: Vec<_> = pitch.get_children(true).iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["step", "alter", "octave"]);
}

// =============================================================================
// Notations and nested structures
// =============================================================================

#[test]
fn test_notations_with_articulations() {
    let notations = XmlElement::new("notations").unwrap();
    let articulations = notations
        .add_child(XmlElement::new("articulations").unwrap())
        .unwrap();
    articulations
        .add_child(XmlElement::new("staccato").unwrap())
        .unwrap();
    notations
        .add_child(
            XmlElement::new("slur")
                .unwrap()
                .with_attribute("type", "start")
                .unwrap()
                .with_attribute("number", 1)
                .unwrap(),
        )
        .unwrap();

    let expected = "<notations>\n  <articulations>\n    <staccato />\n  </articulations>\n  <slur type=\"start\" number=\"1\" />\n</notations>\n";
    assert_eq!(notations.to_string().unwrap(), expected);
}

#[test]
fn test_required_attribute_enforced_on_serialize() {
    let barline = XmlElement::new("barline").unwrap();
    let repeat = barline
        .add_child(XmlElement::new("repeat").unwrap())
        .unwrap();
    let err = barline.to_string().unwrap_err();
    match err {
        Error::RequiredAttributeMissing { element, attribute } => {
            assert_eq!(element, "repeat");
            assert_eq!(attribute, "direction");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    repeat.set_attribute("direction", "backward").unwrap();
    assert!(barline.to_string().is_ok());
}

#[test]
fn test_remove_add_identity() {
    let articulations = XmlElement::new("articulations").unwrap();
    articulations
        .add_child(XmlElement::new("accent").unwrap())
        .unwrap();
    let staccato = articulations
        .add_child(XmlElement::new("staccato").unwrap())
        .unwrap();
    let before = articulations.to_string().unwrap();

    articulations.remove(&staccato).unwrap();
    assert_eq!(
        articulations.to_string().unwrap(),
        "<articulations>\n  <accent />\n</articulations>\n"
    );

    articulations.add_child(staccato).unwrap();
    assert_eq!(articulations.to_string().unwrap(), before);
}

// =============================================================================
// Full documents and round-trips
// =============================================================================

fn build_score() -> XmlElement {
    let score = XmlElement::new("score-partwise")
        .unwrap()
        .with_attribute("version", "4.0")
        .unwrap();

    let part_list = score
        .add_child(XmlElement::new("part-list").unwrap())
        .unwrap();
    let score_part = part_list
        .add_child(
            XmlElement::new("score-part")
                .unwrap()
                .with_attribute("id", "P1")
                .unwrap(),
        )
        .unwrap();
    score_part.set_child_value("part-name", "Music").unwrap();

    let part = score
        .add_child(
            XmlElement::new("part")
                .unwrap()
                .with_attribute("id", "P1")
                .unwrap(),
        )
        .unwrap();
    let measure = part
        .add_child(
            XmlElement::new("measure")
                .unwrap()
                .with_attribute("number", "1")
                .unwrap(),
        )
        .unwrap();

    let attributes = measure
        .add_child(XmlElement::new("attributes").unwrap())
        .unwrap();
    attributes.set_child_value("divisions", 1).unwrap();
    let key = attributes.add_child(XmlElement::new("key").unwrap()).unwrap();
    key.set_child_value("fifths", 0).unwrap();
    let time = attributes.add_child(XmlElement::new("time").unwrap()).unwrap();
    time.set_child_value("beats", "4").unwrap();
    time.set_child_value("beat-type", "4").unwrap();
    let clef = attributes.add_child(XmlElement::new("clef").unwrap()).unwrap();
    clef.set_child_value("sign", "G").unwrap();
    clef.set_child_value("line", 2).unwrap();

    let note = measure.add_child(XmlElement::new("note").unwrap()).unwrap();
    let pitch = note.add_child(XmlElement::new("pitch").unwrap()).unwrap();
    pitch.set_child_value("step", "C").unwrap();
    pitch.set_child_value("octave", 4).unwrap();
    note.set_child_value("duration", 4).unwrap();
    note.set_child_value("voice", "1").unwrap();
    note.set_child_value("type", "whole").unwrap();

    score
}

const EXPECTED_SCORE: &str = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<score-partwise version=\"4.0\">
  <part-list>
    <score-part id=\"P1\">
      <part-name>Music</part-name>
    </score-part>
  </part-list>
  <part id=\"P1\">
    <measure number=\"1\">
      <attributes>
        <divisions>1</divisions>
        <key>
          <fifths>0</fifths>
        </key>
        <time>
          <beats>4</beats>
          <beat-type>4</beat-type>
        </time>
        <clef>
          <sign>G</sign>
          <line>2</line>
        </clef>
      </attributes>
      <note>
        <pitch>
          <step>C</step>
          <octave>4</octave>
        </pitch>
        <duration>4</duration>
        <voice>1</voice>
        <type>whole</type>
      </note>
    </measure>
  </part>
</score-partwise>
";

#[test]
fn test_full_score_output() {
    let score = build_score();
    assert_eq!(
        score.serialize(&WriteOptions::default()).unwrap(),
        EXPECTED_SCORE
    );
}

#[test]
fn test_string_round_trip() {
    let score = build_score();
    let first = score.serialize(&WriteOptions::default()).unwrap();
    let reparsed = parse_musicxml_str(&first).unwrap();
    let second = reparsed.serialize(&WriteOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_file_round_trip() {
    let score = build_score();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score.musicxml");
    score.write(&path).unwrap();

    let reparsed = parse_musicxml(&path).unwrap();
    assert_eq!(
        reparsed.serialize(&WriteOptions::default()).unwrap(),
        EXPECTED_SCORE
    );
}

#[test]
fn test_parse_preserves_values_and_attributes() {
    let score = parse_musicxml_str(EXPECTED_SCORE).unwrap();
    assert_eq!(
        score.attribute("version"),
        Some(XmlValue::String("4.0".to_string()))
    );
    let note = score
        .child("part")
        .unwrap()
        .child("measure")
        .unwrap()
        .child("note")
        .unwrap();
    assert_eq!(
        note.child("duration").unwrap().value(),
        Some(XmlValue::Decimal("4".parse().unwrap()))
    );
    assert_eq!(
        note.child("pitch").unwrap().child("step").unwrap().value(),
        Some(XmlValue::String("C".to_string()))
    );
}

#[test]
fn test_deep_copy_of_score_is_equivalent() {
    let score = build_score();
    let copy = score.deep_copy();
    assert_eq!(
        copy.serialize(&WriteOptions::default()).unwrap(),
        EXPECTED_SCORE
    );
}

#[test]
fn test_unchecked_subtree_under_checked_parent() {
    let score = XmlElement::new("score-partwise").unwrap();
    let part_list = score
        .add_child(XmlElement::new("part-list").unwrap().with_xsd_check(false))
        .unwrap();
    let part = score
        .add_child(
            XmlElement::new("part")
                .unwrap()
                .with_attribute("id", "P1")
                .unwrap(),
        )
        .unwrap();
    part.add_child(
        XmlElement::new("measure")
            .unwrap()
            .with_attribute("number", "1")
            .unwrap(),
    )
    .unwrap();

    // the empty part-list satisfies the parent's container structurally,
    // and its own requirements are not checked
    assert_eq!(part_list.to_string().unwrap(), "<part-list />\n");
    assert!(score.to_string().is_ok());
}
