//! Compiled-in schema tables for MusicXML 4.0
//!
//! -----------------------------------------------------
//! GENERATED from musicxml.xsd by the schema table
//! generator. Covers the partwise document hierarchy.
//! Do not edit by hand; regenerate instead.
//! -----------------------------------------------------
//!
//! Reference: https://www.w3.org/2021/06/musicxml40/

use rust_decimal::Decimal;

use super::complex_types::{AttributeDecl, ComplexTypeDef};
use super::particles::Particle;
use super::simple_types::{FacetSet, Primitive, SimpleTypeDef};
use super::{ElementDecl, SchemaTable, TypeRef};

/// Build the full table set
pub(crate) fn build() -> SchemaTable {
    let mut t = SchemaTable::default();
    register_simple_types(&mut t);
    register_groups(&mut t);
    register_complex_types(&mut t);
    register_elements(&mut t);
    t
}

fn dec(s: &str) -> Decimal {
    s.parse().expect("invalid decimal literal in schema table")
}

// =============================================================================
// Simple types
// =============================================================================

fn register_simple_types(t: &mut SchemaTable) {
    // XSD built-ins
    t.insert_simple_type(SimpleTypeDef::atomic("xs:string", Primitive::String));
    t.insert_simple_type(SimpleTypeDef::atomic("xs:token", Primitive::Token));
    t.insert_simple_type(SimpleTypeDef::atomic("xs:NMTOKEN", Primitive::NmToken));
    t.insert_simple_type(SimpleTypeDef::atomic("xs:ID", Primitive::Id));
    t.insert_simple_type(SimpleTypeDef::atomic("xs:IDREF", Primitive::Idref));
    t.insert_simple_type(SimpleTypeDef::atomic("xs:anyURI", Primitive::AnyUri));
    t.insert_simple_type(SimpleTypeDef::atomic("xs:date", Primitive::Date));
    t.insert_simple_type(SimpleTypeDef::atomic("xs:integer", Primitive::Integer));
    t.insert_simple_type(SimpleTypeDef::atomic(
        "xs:nonNegativeInteger",
        Primitive::NonNegativeInteger,
    ));
    t.insert_simple_type(SimpleTypeDef::atomic(
        "xs:positiveInteger",
        Primitive::PositiveInteger,
    ));
    t.insert_simple_type(SimpleTypeDef::atomic("xs:decimal", Primitive::Decimal));
    t.insert_simple_type(SimpleTypeDef::atomic("xs:double", Primitive::Double));
    t.insert_simple_type(SimpleTypeDef::atomic("xs:boolean", Primitive::Boolean));

    // MusicXML simple types
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "above-below",
        vec!["above", "below"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "accidental-value",
        vec![
            "sharp",
            "natural",
            "flat",
            "double-sharp",
            "sharp-sharp",
            "flat-flat",
            "natural-sharp",
            "natural-flat",
            "quarter-flat",
            "quarter-sharp",
            "three-quarters-flat",
            "three-quarters-sharp",
            "sharp-down",
            "sharp-up",
            "natural-down",
            "natural-up",
            "flat-down",
            "flat-up",
            "double-sharp-down",
            "double-sharp-up",
            "flat-flat-down",
            "flat-flat-up",
            "arrow-down",
            "arrow-up",
            "triple-sharp",
            "triple-flat",
            "slash-quarter-sharp",
            "slash-sharp",
            "slash-flat",
            "double-slash-flat",
            "sharp-1",
            "sharp-2",
            "sharp-3",
            "sharp-5",
            "flat-1",
            "flat-2",
            "flat-3",
            "flat-4",
            "sori",
            "koron",
            "other",
        ],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "backward-forward",
        vec!["backward", "forward"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "bar-style",
        vec![
            "regular",
            "dotted",
            "dashed",
            "heavy",
            "light-light",
            "light-heavy",
            "heavy-light",
            "heavy-heavy",
            "tick",
            "short",
            "none",
        ],
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "beam-level",
        "xs:positiveInteger",
        FacetSet::new().with_max_inclusive(dec("8")),
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "beam-value",
        vec!["begin", "continue", "end", "forward hook", "backward hook"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "breath-mark-value",
        vec!["", "comma", "tick", "upbow", "salzedo"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "caesura-value",
        vec!["normal", "thin", "short", "curved", "single", ""],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "clef-sign",
        vec!["G", "F", "C", "percussion", "TAB", "jianpu", "none"],
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "color",
        "xs:token",
        FacetSet::new().with_pattern(r"#[\dA-F]{6}([\dA-F][\dA-F])?"),
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "comma-separated-text",
        "xs:token",
        FacetSet::new().with_pattern(r"[^,]+(, ?[^,]+)*"),
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "css-font-size",
        vec![
            "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large",
        ],
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "divisions",
        "xs:decimal",
        FacetSet::new(),
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "ending-number",
        "xs:token",
        FacetSet::new().with_pattern(r"([ ]*)|([1-9][0-9]*(, ?[1-9][0-9]*)*)"),
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "fermata-shape",
        vec![
            "normal",
            "angled",
            "square",
            "double-angled",
            "double-square",
            "double-dot",
            "half-curve",
            "curlew",
            "",
        ],
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "fifths",
        "xs:integer",
        FacetSet::new(),
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "font-family",
        "comma-separated-text",
        FacetSet::new(),
    ));
    t.insert_simple_type(SimpleTypeDef::union(
        "font-size",
        vec!["xs:decimal", "css-font-size"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "font-style",
        vec!["normal", "italic"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "font-weight",
        vec!["normal", "bold"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "group-barline-value",
        vec!["yes", "no", "Mensurstrich"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "group-symbol-value",
        vec!["none", "brace", "line", "bracket", "square"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "left-center-right",
        vec!["left", "center", "right"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "line-shape",
        vec!["straight", "curved"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "line-type",
        vec!["solid", "dashed", "dotted", "wavy"],
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "measure-text",
        "xs:token",
        FacetSet::new().with_min_length(1),
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "mode",
        "xs:string",
        FacetSet::new(),
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "non-negative-decimal",
        "xs:decimal",
        FacetSet::new().with_min_inclusive(dec("0")),
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "note-type-value",
        vec![
            "1024th", "512th", "256th", "128th", "64th", "32nd", "16th", "eighth", "quarter",
            "half", "whole", "breve", "long", "maxima",
        ],
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "number-level",
        "xs:positiveInteger",
        FacetSet::new().with_max_inclusive(dec("16")),
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "octave",
        "xs:integer",
        FacetSet::new()
            .with_min_inclusive(dec("0"))
            .with_max_inclusive(dec("9")),
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "percent",
        "xs:decimal",
        FacetSet::new()
            .with_min_inclusive(dec("0"))
            .with_max_inclusive(dec("100")),
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "positive-divisions",
        "divisions",
        FacetSet::new().with_min_exclusive(dec("0")),
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "right-left-middle",
        vec!["right", "left", "middle"],
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "semitones",
        "xs:decimal",
        FacetSet::new(),
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "smufl-glyph-name",
        "xs:NMTOKEN",
        FacetSet::new(),
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "staff-line-position",
        "xs:integer",
        FacetSet::new(),
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "staff-number",
        "xs:positiveInteger",
        FacetSet::new(),
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "start-stop",
        vec!["start", "stop"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "start-stop-continue",
        vec!["start", "stop", "continue"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "start-stop-discontinue",
        vec!["start", "stop", "discontinue"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "start-stop-single",
        vec!["start", "stop", "single"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "stem-value",
        vec!["down", "up", "double", "none"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "step",
        vec!["A", "B", "C", "D", "E", "F", "G"],
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "tenths",
        "xs:decimal",
        FacetSet::new(),
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "tied-type",
        vec!["start", "stop", "continue", "let-ring"],
    ));
    t.insert_simple_type(SimpleTypeDef::restriction(
        "time-only",
        "xs:token",
        FacetSet::new().with_pattern(r"[1-9][0-9]*(, ?[1-9][0-9]*)*"),
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "time-symbol",
        vec![
            "common",
            "cut",
            "single-number",
            "note",
            "dotted-note",
            "normal",
        ],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration("up-down", vec!["up", "down"]));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "upright-inverted",
        vec!["upright", "inverted"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration(
        "valign",
        vec!["top", "middle", "bottom", "baseline"],
    ));
    t.insert_simple_type(SimpleTypeDef::enumeration("yes-no", vec!["yes", "no"]));
}

// =============================================================================
// Attribute groups (flattened)
// =============================================================================

fn position() -> Vec<AttributeDecl> {
    vec![
        AttributeDecl::new("default-x", "tenths"),
        AttributeDecl::new("default-y", "tenths"),
        AttributeDecl::new("relative-x", "tenths"),
        AttributeDecl::new("relative-y", "tenths"),
    ]
}

fn font() -> Vec<AttributeDecl> {
    vec![
        AttributeDecl::new("font-family", "font-family"),
        AttributeDecl::new("font-style", "font-style"),
        AttributeDecl::new("font-size", "font-size"),
        AttributeDecl::new("font-weight", "font-weight"),
    ]
}

fn color() -> Vec<AttributeDecl> {
    vec![AttributeDecl::new("color", "color")]
}

fn print_style() -> Vec<AttributeDecl> {
    let mut attrs = position();
    attrs.extend(font());
    attrs.extend(color());
    attrs
}

fn placement() -> Vec<AttributeDecl> {
    vec![AttributeDecl::new("placement", "above-below")]
}

fn print_object() -> Vec<AttributeDecl> {
    vec![AttributeDecl::new("print-object", "yes-no")]
}

fn justify() -> Vec<AttributeDecl> {
    vec![AttributeDecl::new("justify", "left-center-right")]
}

fn optional_unique_id() -> Vec<AttributeDecl> {
    vec![AttributeDecl::new("id", "xs:ID")]
}

fn concat(groups: Vec<Vec<AttributeDecl>>) -> Vec<AttributeDecl> {
    groups.into_iter().flatten().collect()
}

// =============================================================================
// Named model groups
// =============================================================================

fn register_groups(t: &mut SchemaTable) {
    t.insert_group(
        "score-header",
        Particle::sequence(vec![
            Particle::element("work").optional(),
            Particle::element("movement-number").optional(),
            Particle::element("movement-title").optional(),
            Particle::element("identification").optional(),
            Particle::element("part-list"),
        ]),
    );
    t.insert_group(
        "part-group",
        Particle::sequence(vec![Particle::element("part-group")]),
    );
    t.insert_group(
        "score-part",
        Particle::sequence(vec![Particle::element("score-part")]),
    );
    t.insert_group(
        "music-data",
        Particle::sequence(vec![Particle::choice(vec![
            Particle::element("note"),
            Particle::element("backup"),
            Particle::element("forward"),
            Particle::element("attributes"),
            Particle::element("barline"),
        ])
        .zero_or_more()]),
    );
    t.insert_group(
        "full-note",
        Particle::sequence(vec![
            Particle::element("chord").optional(),
            Particle::choice(vec![
                Particle::element("pitch"),
                Particle::element("unpitched"),
                Particle::element("rest"),
            ]),
        ]),
    );
    t.insert_group(
        "duration",
        Particle::sequence(vec![Particle::element("duration")]),
    );
    t.insert_group(
        "footnote",
        Particle::sequence(vec![Particle::element("footnote")]),
    );
    t.insert_group("level", Particle::sequence(vec![Particle::element("level")]));
    t.insert_group("voice", Particle::sequence(vec![Particle::element("voice")]));
    t.insert_group("staff", Particle::sequence(vec![Particle::element("staff")]));
    t.insert_group(
        "editorial",
        Particle::sequence(vec![
            Particle::group_ref("footnote").optional(),
            Particle::group_ref("level").optional(),
        ]),
    );
    t.insert_group(
        "editorial-voice",
        Particle::sequence(vec![
            Particle::group_ref("footnote").optional(),
            Particle::group_ref("level").optional(),
            Particle::group_ref("voice").optional(),
        ]),
    );
    t.insert_group(
        "display-step-octave",
        Particle::sequence(vec![
            Particle::element("display-step"),
            Particle::element("display-octave"),
        ]),
    );
    t.insert_group(
        "traditional-key",
        Particle::sequence(vec![
            Particle::element("cancel").optional(),
            Particle::element("fifths"),
            Particle::element("mode").optional(),
        ]),
    );
    t.insert_group(
        "non-traditional-key",
        Particle::sequence(vec![
            Particle::element("key-step"),
            Particle::element("key-alter"),
            Particle::element("key-accidental").optional(),
        ]),
    );
    t.insert_group(
        "time-signature",
        Particle::sequence(vec![
            Particle::element("beats"),
            Particle::element("beat-type"),
        ]),
    );
}

// =============================================================================
// Complex types
// =============================================================================

fn register_complex_types(t: &mut SchemaTable) {
    t.insert_complex_type(ComplexTypeDef::empty("empty"));

    t.insert_complex_type(
        ComplexTypeDef::empty("empty-placement")
            .with_attributes(concat(vec![print_style(), placement()])),
    );

    t.insert_complex_type(ComplexTypeDef::empty("empty-line").with_attributes(concat(vec![
        vec![
            AttributeDecl::new("line-shape", "line-shape"),
            AttributeDecl::new("line-type", "line-type"),
        ],
        print_style(),
        placement(),
    ])));

    t.insert_complex_type(
        ComplexTypeDef::empty("strong-accent").with_attributes(concat(vec![
            print_style(),
            placement(),
            vec![AttributeDecl::new("type", "up-down").with_default("up")],
        ])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("breath-mark", "breath-mark-value")
            .with_attributes(concat(vec![print_style(), placement()])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("caesura", "caesura-value")
            .with_attributes(concat(vec![print_style(), placement()])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("other-placement-text", "xs:string")
            .with_attributes(concat(vec![
                print_style(),
                placement(),
                vec![AttributeDecl::new("smufl", "smufl-glyph-name")],
            ])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "articulations",
            Particle::choice(vec![
                Particle::element("accent"),
                Particle::element("strong-accent"),
                Particle::element("staccato"),
                Particle::element("tenuto"),
                Particle::element("detached-legato"),
                Particle::element("staccatissimo"),
                Particle::element("spiccato"),
                Particle::element("scoop"),
                Particle::element("plop"),
                Particle::element("doit"),
                Particle::element("falloff"),
                Particle::element("breath-mark"),
                Particle::element("caesura"),
                Particle::element("stress"),
                Particle::element("unstress"),
                Particle::element("soft-accent"),
                Particle::element("other-articulation"),
            ])
            .zero_or_more(),
        )
        .with_attributes(optional_unique_id()),
    );

    t.insert_complex_type(ComplexTypeDef::with_content(
        "pitch",
        Particle::sequence(vec![
            Particle::element("step"),
            Particle::element("alter").optional(),
            Particle::element("octave"),
        ]),
    ));

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "rest",
            Particle::sequence(vec![Particle::group_ref("display-step-octave").optional()]),
        )
        .with_attributes(vec![AttributeDecl::new("measure", "yes-no")]),
    );

    t.insert_complex_type(ComplexTypeDef::with_content(
        "unpitched",
        Particle::sequence(vec![Particle::group_ref("display-step-octave").optional()]),
    ));

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "note",
            Particle::sequence(vec![
                Particle::choice(vec![
                    Particle::sequence(vec![
                        Particle::element("grace"),
                        Particle::choice(vec![
                            Particle::sequence(vec![
                                Particle::group_ref("full-note"),
                                Particle::element("tie").with_occurs(0, Some(2)),
                            ]),
                            Particle::sequence(vec![
                                Particle::element("cue"),
                                Particle::group_ref("full-note"),
                            ]),
                        ]),
                    ]),
                    Particle::sequence(vec![
                        Particle::element("cue"),
                        Particle::group_ref("full-note"),
                        Particle::group_ref("duration"),
                    ]),
                    Particle::sequence(vec![
                        Particle::group_ref("full-note"),
                        Particle::group_ref("duration"),
                        Particle::element("tie").with_occurs(0, Some(2)),
                    ]),
                ]),
                Particle::element("instrument").zero_or_more(),
                Particle::group_ref("editorial-voice"),
                Particle::element("type").optional(),
                Particle::element("dot").zero_or_more(),
                Particle::element("accidental").optional(),
                Particle::element("time-modification").optional(),
                Particle::element("stem").optional(),
                Particle::group_ref("staff").optional(),
                Particle::element("beam").with_occurs(0, Some(8)),
                Particle::element("notations").zero_or_more(),
            ]),
        )
        .with_attributes(concat(vec![
            print_style(),
            print_object(),
            optional_unique_id(),
        ])),
    );

    t.insert_complex_type(ComplexTypeDef::empty("grace").with_attributes(vec![
        AttributeDecl::new("steal-time-previous", "percent"),
        AttributeDecl::new("steal-time-following", "percent"),
        AttributeDecl::new("make-time", "divisions"),
        AttributeDecl::new("slash", "yes-no"),
    ]));

    t.insert_complex_type(ComplexTypeDef::empty("tie").with_attributes(vec![
        AttributeDecl::required("type", "start-stop"),
        AttributeDecl::new("time-only", "time-only"),
    ]));

    t.insert_complex_type(
        ComplexTypeDef::empty("instrument")
            .with_attributes(vec![AttributeDecl::required("id", "xs:IDREF")]),
    );

    t.insert_complex_type(ComplexTypeDef::with_simple_content(
        "note-type",
        "note-type-value",
    ));

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("accidental", "accidental-value").with_attributes(
            concat(vec![
                vec![
                    AttributeDecl::new("cautionary", "yes-no"),
                    AttributeDecl::new("editorial", "yes-no"),
                ],
                print_style(),
            ]),
        ),
    );

    t.insert_complex_type(ComplexTypeDef::with_content(
        "time-modification",
        Particle::sequence(vec![
            Particle::element("actual-notes"),
            Particle::element("normal-notes"),
            Particle::sequence(vec![
                Particle::element("normal-type"),
                Particle::element("normal-dot").zero_or_more(),
            ])
            .optional(),
        ]),
    ));

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("stem", "stem-value")
            .with_attributes(concat(vec![position(), color()])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("beam", "beam-value").with_attributes(concat(vec![
            vec![AttributeDecl::new("number", "beam-level").with_default("1")],
            color(),
        ])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "notations",
            Particle::sequence(vec![
                Particle::group_ref("editorial"),
                Particle::choice(vec![
                    Particle::element("tied"),
                    Particle::element("slur"),
                    Particle::element("articulations"),
                    Particle::element("fermata"),
                    Particle::element("arpeggiate"),
                ])
                .zero_or_more(),
            ]),
        )
        .with_attributes(concat(vec![print_object(), optional_unique_id()])),
    );

    t.insert_complex_type(ComplexTypeDef::empty("tied").with_attributes(concat(vec![
        vec![
            AttributeDecl::required("type", "tied-type"),
            AttributeDecl::new("number", "number-level"),
            AttributeDecl::new("line-type", "line-type"),
        ],
        placement(),
        vec![AttributeDecl::new("orientation", "up-down")],
        color(),
    ])));

    t.insert_complex_type(ComplexTypeDef::empty("slur").with_attributes(concat(vec![
        vec![
            AttributeDecl::required("type", "start-stop-continue"),
            AttributeDecl::new("number", "number-level").with_default("1"),
            AttributeDecl::new("line-type", "line-type"),
        ],
        placement(),
        vec![AttributeDecl::new("orientation", "up-down")],
        color(),
    ])));

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("fermata", "fermata-shape").with_attributes(concat(
            vec![
                vec![AttributeDecl::new("type", "upright-inverted")],
                print_style(),
                optional_unique_id(),
            ],
        )),
    );

    t.insert_complex_type(ComplexTypeDef::empty("arpeggiate").with_attributes(concat(vec![
        vec![
            AttributeDecl::new("number", "number-level"),
            AttributeDecl::new("direction", "up-down"),
        ],
        placement(),
        color(),
        optional_unique_id(),
    ])));

    t.insert_complex_type(ComplexTypeDef::with_content(
        "backup",
        Particle::sequence(vec![
            Particle::group_ref("duration"),
            Particle::group_ref("editorial"),
        ]),
    ));

    t.insert_complex_type(ComplexTypeDef::with_content(
        "forward",
        Particle::sequence(vec![
            Particle::group_ref("duration"),
            Particle::group_ref("editorial-voice"),
            Particle::group_ref("staff").optional(),
        ]),
    ));

    t.insert_complex_type(ComplexTypeDef::with_content(
        "attributes",
        Particle::sequence(vec![
            Particle::group_ref("editorial"),
            Particle::element("divisions").optional(),
            Particle::element("key").zero_or_more(),
            Particle::element("time").zero_or_more(),
            Particle::element("staves").optional(),
            Particle::element("clef").zero_or_more(),
        ]),
    ));

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "key",
            Particle::sequence(vec![Particle::choice(vec![
                Particle::group_ref("traditional-key"),
                Particle::group_ref("non-traditional-key").zero_or_more(),
            ])]),
        )
        .with_attributes(concat(vec![
            vec![AttributeDecl::new("number", "staff-number")],
            print_object(),
            optional_unique_id(),
        ])),
    );

    t.insert_complex_type(ComplexTypeDef::with_simple_content("cancel", "fifths"));

    t.insert_complex_type(ComplexTypeDef::with_simple_content(
        "key-accidental",
        "accidental-value",
    ));

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "time",
            Particle::choice(vec![
                Particle::sequence(vec![Particle::group_ref("time-signature").one_or_more()]),
                Particle::element("senza-misura"),
            ]),
        )
        .with_attributes(concat(vec![
            vec![
                AttributeDecl::new("number", "staff-number"),
                AttributeDecl::new("symbol", "time-symbol"),
            ],
            print_object(),
            optional_unique_id(),
        ])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "clef",
            Particle::sequence(vec![
                Particle::element("sign"),
                Particle::element("line").optional(),
                Particle::element("clef-octave-change").optional(),
            ]),
        )
        .with_attributes(concat(vec![
            vec![
                AttributeDecl::new("number", "staff-number"),
                AttributeDecl::new("additional", "yes-no"),
            ],
            print_object(),
            optional_unique_id(),
        ])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "barline",
            Particle::sequence(vec![
                Particle::element("bar-style").optional(),
                Particle::group_ref("editorial"),
                Particle::element("fermata").with_occurs(0, Some(2)),
                Particle::element("ending").optional(),
                Particle::element("repeat").optional(),
            ]),
        )
        .with_attributes(concat(vec![
            vec![AttributeDecl::new("location", "right-left-middle").with_default("right")],
            optional_unique_id(),
        ])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("bar-style-color", "bar-style")
            .with_attributes(color()),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("ending", "xs:string").with_attributes(vec![
            AttributeDecl::required("number", "ending-number"),
            AttributeDecl::required("type", "start-stop-discontinue"),
        ]),
    );

    t.insert_complex_type(ComplexTypeDef::empty("repeat").with_attributes(vec![
        AttributeDecl::required("direction", "backward-forward"),
        AttributeDecl::new("times", "xs:nonNegativeInteger"),
    ]));

    t.insert_complex_type(
        ComplexTypeDef::with_content("measure", Particle::group_ref("music-data"))
            .with_attributes(concat(vec![
                vec![
                    AttributeDecl::required("number", "xs:token"),
                    AttributeDecl::new("text", "measure-text"),
                    AttributeDecl::new("implicit", "yes-no"),
                    AttributeDecl::new("non-controlling", "yes-no"),
                    AttributeDecl::new("width", "tenths"),
                ],
                optional_unique_id(),
            ])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "part",
            Particle::sequence(vec![Particle::element("measure").one_or_more()]),
        )
        .with_attributes(vec![AttributeDecl::required("id", "xs:IDREF")]),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "score-partwise",
            Particle::sequence(vec![
                Particle::group_ref("score-header"),
                Particle::element("part").one_or_more(),
            ]),
        )
        .with_attributes(vec![AttributeDecl::new("version", "xs:token").with_default("1.0")]),
    );

    t.insert_complex_type(ComplexTypeDef::with_content(
        "work",
        Particle::sequence(vec![
            Particle::element("work-number").optional(),
            Particle::element("work-title").optional(),
        ]),
    ));

    t.insert_complex_type(ComplexTypeDef::with_content(
        "identification",
        Particle::sequence(vec![
            Particle::element("creator").zero_or_more(),
            Particle::element("rights").zero_or_more(),
            Particle::element("encoding").optional(),
            Particle::element("source").optional(),
        ]),
    ));

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("typed-text", "xs:string")
            .with_attributes(vec![AttributeDecl::new("type", "xs:token")]),
    );

    t.insert_complex_type(ComplexTypeDef::with_content(
        "encoding",
        Particle::choice(vec![
            Particle::element("encoding-date"),
            Particle::element("encoder"),
            Particle::element("software"),
            Particle::element("encoding-description"),
            Particle::element("supports"),
        ])
        .zero_or_more(),
    ));

    t.insert_complex_type(ComplexTypeDef::empty("supports").with_attributes(vec![
        AttributeDecl::required("type", "yes-no"),
        AttributeDecl::required("element", "xs:NMTOKEN"),
        AttributeDecl::new("attribute", "xs:NMTOKEN"),
        AttributeDecl::new("value", "xs:token"),
    ]));

    t.insert_complex_type(ComplexTypeDef::with_content(
        "part-list",
        Particle::sequence(vec![
            Particle::group_ref("part-group").zero_or_more(),
            Particle::group_ref("score-part"),
            Particle::choice(vec![
                Particle::group_ref("part-group"),
                Particle::group_ref("score-part"),
            ])
            .zero_or_more(),
        ]),
    ));

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "part-group",
            Particle::sequence(vec![
                Particle::element("group-name").optional(),
                Particle::element("group-abbreviation").optional(),
                Particle::element("group-symbol").optional(),
                Particle::element("group-barline").optional(),
                Particle::group_ref("editorial"),
            ]),
        )
        .with_attributes(vec![
            AttributeDecl::required("type", "start-stop"),
            AttributeDecl::new("number", "xs:token").with_default("1"),
        ]),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("group-name", "xs:string")
            .with_attributes(concat(vec![print_style(), justify()])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("group-symbol", "group-symbol-value")
            .with_attributes(concat(vec![position(), color()])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("group-barline", "group-barline-value")
            .with_attributes(color()),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "score-part",
            Particle::sequence(vec![
                Particle::element("identification").optional(),
                Particle::element("part-name"),
                Particle::element("part-abbreviation").optional(),
                Particle::element("group").zero_or_more(),
                Particle::element("score-instrument").zero_or_more(),
            ]),
        )
        .with_attributes(vec![AttributeDecl::required("id", "xs:ID")]),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("part-name", "xs:string").with_attributes(concat(
            vec![print_style(), print_object(), justify()],
        )),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_content(
            "score-instrument",
            Particle::sequence(vec![
                Particle::element("instrument-name"),
                Particle::element("instrument-abbreviation").optional(),
            ]),
        )
        .with_attributes(vec![AttributeDecl::required("id", "xs:ID")]),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("formatted-text", "xs:string")
            .with_attributes(concat(vec![justify(), print_style()])),
    );

    t.insert_complex_type(
        ComplexTypeDef::with_simple_content("level", "xs:string")
            .with_attributes(vec![AttributeDecl::new("reference", "yes-no")]),
    );
}

// =============================================================================
// Element declarations
// =============================================================================

fn register_elements(t: &mut SchemaTable) {
    let complex: &[(&'static str, &'static str)] = &[
        ("score-partwise", "score-partwise"),
        ("part", "part"),
        ("measure", "measure"),
        ("work", "work"),
        ("identification", "identification"),
        ("creator", "typed-text"),
        ("rights", "typed-text"),
        ("encoding", "encoding"),
        ("encoder", "typed-text"),
        ("supports", "supports"),
        ("part-list", "part-list"),
        ("part-group", "part-group"),
        ("group-name", "group-name"),
        ("group-abbreviation", "group-name"),
        ("group-symbol", "group-symbol"),
        ("group-barline", "group-barline"),
        ("score-part", "score-part"),
        ("part-name", "part-name"),
        ("part-abbreviation", "part-name"),
        ("score-instrument", "score-instrument"),
        ("note", "note"),
        ("grace", "grace"),
        ("cue", "empty"),
        ("chord", "empty"),
        ("pitch", "pitch"),
        ("rest", "rest"),
        ("unpitched", "unpitched"),
        ("tie", "tie"),
        ("instrument", "instrument"),
        ("footnote", "formatted-text"),
        ("level", "level"),
        ("type", "note-type"),
        ("dot", "empty-placement"),
        ("accidental", "accidental"),
        ("time-modification", "time-modification"),
        ("normal-dot", "empty"),
        ("stem", "stem"),
        ("beam", "beam"),
        ("notations", "notations"),
        ("tied", "tied"),
        ("slur", "slur"),
        ("fermata", "fermata"),
        ("arpeggiate", "arpeggiate"),
        ("articulations", "articulations"),
        ("accent", "empty-placement"),
        ("strong-accent", "strong-accent"),
        ("staccato", "empty-placement"),
        ("tenuto", "empty-placement"),
        ("detached-legato", "empty-placement"),
        ("staccatissimo", "empty-placement"),
        ("spiccato", "empty-placement"),
        ("scoop", "empty-line"),
        ("plop", "empty-line"),
        ("doit", "empty-line"),
        ("falloff", "empty-line"),
        ("breath-mark", "breath-mark"),
        ("caesura", "caesura"),
        ("stress", "empty-placement"),
        ("unstress", "empty-placement"),
        ("soft-accent", "empty-placement"),
        ("other-articulation", "other-placement-text"),
        ("backup", "backup"),
        ("forward", "forward"),
        ("attributes", "attributes"),
        ("key", "key"),
        ("cancel", "cancel"),
        ("key-accidental", "key-accidental"),
        ("time", "time"),
        ("clef", "clef"),
        ("barline", "barline"),
        ("bar-style", "bar-style-color"),
        ("ending", "ending"),
        ("repeat", "repeat"),
    ];
    for (name, type_name) in complex {
        t.insert_element(ElementDecl {
            name,
            type_ref: TypeRef::Complex(type_name),
        });
    }

    let simple: &[(&'static str, &'static str)] = &[
        ("work-number", "xs:string"),
        ("work-title", "xs:string"),
        ("movement-number", "xs:string"),
        ("movement-title", "xs:string"),
        ("encoding-date", "xs:date"),
        ("software", "xs:string"),
        ("encoding-description", "xs:string"),
        ("source", "xs:string"),
        ("group", "xs:string"),
        ("instrument-name", "xs:string"),
        ("instrument-abbreviation", "xs:string"),
        ("step", "step"),
        ("alter", "semitones"),
        ("octave", "octave"),
        ("display-step", "step"),
        ("display-octave", "octave"),
        ("duration", "positive-divisions"),
        ("voice", "xs:string"),
        ("actual-notes", "xs:nonNegativeInteger"),
        ("normal-notes", "xs:nonNegativeInteger"),
        ("normal-type", "note-type-value"),
        ("staff", "xs:positiveInteger"),
        ("divisions", "positive-divisions"),
        ("fifths", "fifths"),
        ("mode", "mode"),
        ("key-step", "step"),
        ("key-alter", "semitones"),
        ("beats", "xs:string"),
        ("beat-type", "xs:string"),
        ("senza-misura", "xs:string"),
        ("staves", "xs:nonNegativeInteger"),
        ("sign", "clef-sign"),
        ("line", "staff-line-position"),
        ("clef-octave-change", "xs:integer"),
    ];
    for (name, type_name) in simple {
        t.insert_element(ElementDecl {
            name,
            type_ref: TypeRef::Simple(type_name),
        });
    }
}
