use otolab::oto::{infer_alias, key_for, parse, serialize, OtoEntry};

#[test]
fn parse_reads_the_documented_line_shape() {
    let entries = parse("voice/_a.wav=a,100,250,-580,300,120\n");
    assert_eq!(entries.len(), 1);
    let e = &entries[0];
    assert_eq!(e.filename, "voice/_a.wav");
    assert_eq!(e.alias, "a");
    assert_eq!(e.offset, 100);
    assert_eq!(e.consonant, 250);
    assert_eq!(e.cutoff, -580);
    assert_eq!(e.preutter, 300);
    assert_eq!(e.overlap, 120);
}

#[test]
fn roundtrip_is_exact_for_nonpositive_cutoff() {
    let text = "a.wav=a,10,20,-30,5,3\nb.wav=bi,0,0,0,0,0\nc.wav=,7,0,-1,2,0";
    let entries = parse(text);
    assert_eq!(serialize(&entries), text);
    assert_eq!(parse(&serialize(&entries)), entries);
}

#[test]
fn positive_cutoff_is_negated_on_load() {
    let entries = parse("a.wav=x,0,0,50,0,0");
    assert_eq!(entries[0].cutoff, -50);
}

#[test]
fn extreme_cutoff_magnitudes_saturate_instead_of_overflowing() {
    // Values far past the i64 range saturate at the type limits and the
    // cutoff still comes out non-positive.
    let entries = parse("a.wav=x,0,0,-99999999999999999999,0,0");
    assert_eq!(entries[0].cutoff, -i64::MAX);

    let entries = parse("a.wav=x,0,0,99999999999999999999,0,0");
    assert_eq!(entries[0].cutoff, -i64::MAX);

    // The other fields keep the saturated value as parsed.
    let entries = parse("a.wav=x,-99999999999999999999,0,0,0,0");
    assert_eq!(entries[0].offset, i64::MIN);
}

#[test]
fn malformed_lines_are_skipped_not_fatal() {
    let text = "no separator here\n\n   \na.wav=a,1,2,-3,4,5\r\nb.wav=b";
    let entries = parse(text);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].alias, "a");
    // missing trailing fields default to zero
    assert_eq!(entries[1].alias, "b");
    assert_eq!(entries[1].offset, 0);
    assert_eq!(entries[1].overlap, 0);
}

#[test]
fn non_numeric_fields_coerce_to_zero() {
    let entries = parse("a.wav=a,xyz,2.6,-oops,,9");
    let e = &entries[0];
    assert_eq!(e.offset, 0);
    assert_eq!(e.consonant, 3);
    assert_eq!(e.cutoff, 0);
    assert_eq!(e.preutter, 0);
    assert_eq!(e.overlap, 9);
}

#[test]
fn split_happens_on_the_first_equals_only() {
    let entries = parse("a.wav=al=ias,1,2,-3,4,5");
    assert_eq!(entries[0].filename, "a.wav");
    assert_eq!(entries[0].alias, "al=ias");
}

#[test]
fn bare_cr_and_crlf_line_endings_are_accepted() {
    let entries = parse("a.wav=a,1,0,0,0,0\rb.wav=b,2,0,0,0,0\r\nc.wav=c,3,0,0,0,0");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].offset, 2);
}

#[test]
fn default_entry_infers_alias_from_resource_name() {
    let e = OtoEntry::for_resource("bank\\_ka.wav");
    assert_eq!(e.alias, "_ka");
    assert_eq!(e.offset, 0);
    assert_eq!(e.cutoff, 0);
    assert_eq!(key_for(&e), "bank\\_ka.wav|_ka");
    assert_eq!(infer_alias("_ka.frq.wav"), "_ka.frq");
}

#[test]
fn end_to_end_scenario_from_text_to_markers_and_back() {
    use otolab::marker::derive_markers;

    let entries = parse("a.wav=A,10,20,-30,5,3\n");
    assert_eq!(entries.len(), 1);
    let m = derive_markers(&entries[0], 1000.0);
    assert_eq!(m.offset, 10.0);
    assert_eq!(m.overlap, 13.0);
    assert_eq!(m.preutter, 15.0);
    assert_eq!(m.consonant, 30.0);
    assert_eq!(m.cutoff, 40.0);
    assert_eq!(serialize(&entries), "a.wav=A,10,20,-30,5,3");
}
