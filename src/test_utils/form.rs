use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_select_one<'a>(html: &'a Html, selector: &str) -> ElementRef<'a> {
    let parsed = Selector::parse(selector).unwrap();
    let mut matches = html.select(&parsed);
    let element = matches
        .next()
        .unwrap_or_else(|| panic!("No element matches {selector:?}"));

    assert!(
        matches.next().is_none(),
        "want exactly one element matching {selector:?}, got more"
    );

    element
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(element: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = element
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        got, endpoint,
        "want element with {attribute}=\"{endpoint}\", got {got:?}"
    );
}

#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let input = form
        .select(&Selector::parse("input").unwrap())
        .find(|input| input.value().attr("name") == Some(name))
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""));

    let got_type = input.value().attr("type").unwrap_or_default();
    assert_eq!(
        got_type, type_,
        "want input {name} with type \"{type_}\", got {got_type:?}"
    );
}

/// The `value` of every visible input in `form`, in document order.
pub(crate) fn visible_input_values(form: &ElementRef<'_>) -> Vec<String> {
    form.select(&Selector::parse("input:not([type=hidden])").unwrap())
        .map(|input| input.value().attr("value").unwrap_or_default().to_owned())
        .collect()
}

#[track_caller]
pub(crate) fn assert_submit_button_text(form: &ElementRef<'_>, text: &str) {
    let button = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .next()
        .expect("No submit button found");

    let got_text = button.text().collect::<String>();
    assert_eq!(got_text.trim(), text);
}
