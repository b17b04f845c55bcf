use httpio::{AcceptMap, HeaderParam, Negotiator};

fn map(entries: &[(&str, f64)]) -> AcceptMap {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn language_negotiation_with_region_merge() {
    let mut n = Negotiator::from_tokens(["sv", "en"]);
    let accept = Negotiator::merge_region(&Negotiator::parse_raw_accept("en-US,en;q=0.9,sv;q=0.8"));

    assert_eq!(n.negotiate_array(&accept), Some("en"));
    assert_eq!(n.last_result(), &map(&[("en", 1.0), ("sv", 0.8)]));
}

#[test]
fn media_type_negotiation_from_content_header() {
    let mut n = Negotiator::from_tokens(["application/json", "text/html"]);
    let chosen = n.negotiate("text/html;level=1;q=0.4, application/json;q=0.7").map(str::to_string);
    assert_eq!(chosen.as_deref(), Some("application/json"));

    let ctype = HeaderParam::parse(&format!("{}; charset=\"utf-8\"", chosen.unwrap()));
    assert_eq!(ctype.base(), "application/json");
    assert_eq!(ctype.param("charset"), "utf-8");
}

#[test]
fn supported_weights_do_not_rank() {
    let mut n = Negotiator::new(map(&[("a", 0.1), ("b", 1.0)]));
    assert_eq!(n.negotiate("b;q=0.5,a;q=0.6"), Some("a"));
    assert_eq!(n.supported()["a"], 0.1);
}
