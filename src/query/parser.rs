use nom::branch::alt;
use nom::bytes::complete::{is_not, tag};
use nom::character::complete::char;
use nom::combinator::{all_consuming, map, opt, rest, value};
use nom::multi::separated_list1;
use nom::sequence::terminated;
use nom::{IResult, Parser};
use crate::core::error::{Error, Result};
use crate::core::types::{FieldValue, Number};
use crate::fields::FieldKind;
use crate::fields::date;
use crate::query::types::{PredicateKind, QueryField, SearchQuery};
use crate::schema::schema::Schema;

/// Parses a URL-encoded query such as
/// `name=partial:bill&age=18,38&sort=desc&sort_by=age&limit=5`.
///
/// Clause values are typed by the field's kind. A comma list on a number or
/// date field without an explicit type becomes a range; text values are
/// never split.
pub fn parse_query_string(input: &str, schema: &Schema) -> Result<SearchQuery> {
    if !input.contains('=') {
        return Err(Error::parse(format!("'{input}' is not a query string")));
    }

    let mut query = SearchQuery::new();
    for (key, raw) in url::form_urlencoded::parse(input.trim_start_matches('?').as_bytes()) {
        match key.as_ref() {
            "limit" => query.limit = parse_count("limit", &raw)?,
            "skip" => query.skip = parse_count("skip", &raw)?,
            "sort" => query.sort = raw.into_owned(),
            "sort_by" => query.sort_by = raw.into_owned(),
            field => query.fields.push(parse_clause(field, &raw, schema)?),
        }
    }

    log::trace!("parsed query string into {} clauses", query.fields.len());
    Ok(query)
}

/// Decodes the JSON wire shape of a `SearchQuery`
pub fn parse_json_query(bytes: &[u8]) -> Result<SearchQuery> {
    Ok(serde_json::from_slice(bytes)?)
}

fn parse_count(name: &str, raw: &str) -> Result<usize> {
    raw.parse()
        .map_err(|_| Error::parse(format!("invalid value '{raw}' for {name}")))
}

fn parse_clause(field: &str, raw: &str, schema: &Schema) -> Result<QueryField> {
    let descriptor = schema
        .descriptor(field)
        .filter(|d| d.supported)
        .ok_or_else(|| Error::invalid_query(format!("field '{field}' does not exist")))?;

    let (explicit, values) = clause_value(raw)
        .map(|(_, parsed)| parsed)
        .map_err(|err| Error::parse(format!("invalid value for '{field}': {err}")))?;

    let (predicate, value) = match &descriptor.kind {
        FieldKind::Number => typed_list(values, parse_number)?,
        FieldKind::Date => typed_list(values, parse_date)?,
        FieldKind::Boolean => {
            let joined = values.join(",");
            let flag = joined
                .parse::<bool>()
                .map_err(|_| Error::parse(format!("invalid boolean '{joined}'")))?;
            (PredicateKind::Match, FieldValue::Boolean(flag))
        }
        _ => (PredicateKind::Match, FieldValue::Text(values.join(","))),
    };

    Ok(QueryField::new(field, explicit.unwrap_or(predicate), value))
}

/// One value stays scalar (match); several become a list (range)
fn typed_list(
    values: Vec<&str>,
    parse: fn(&str) -> Result<FieldValue>,
) -> Result<(PredicateKind, FieldValue)> {
    let mut typed = values.into_iter().map(parse).collect::<Result<Vec<_>>>()?;
    if typed.len() == 1 {
        Ok((PredicateKind::Match, typed.remove(0)))
    } else {
        Ok((PredicateKind::Range, FieldValue::List(typed)))
    }
}

/// `[match:|partial:|range:]v1,v2,...`
fn clause_value(input: &str) -> IResult<&str, (Option<PredicateKind>, Vec<&str>)> {
    all_consuming((
        opt(predicate_prefix),
        alt((
            all_consuming(separated_list1(char(','), is_not(","))),
            map(rest, |empty: &str| vec![empty]),
        )),
    ))
    .parse(input)
}

fn predicate_prefix(input: &str) -> IResult<&str, PredicateKind> {
    terminated(
        alt((
            value(PredicateKind::Match, tag("match")),
            value(PredicateKind::Partial, tag("partial")),
            value(PredicateKind::Range, tag("range")),
        )),
        char(':'),
    )
    .parse(input)
}

fn parse_number(raw: &str) -> Result<FieldValue> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return Ok(Number::Int(v).into());
    }
    if let Ok(v) = raw.parse::<u64>() {
        return Ok(Number::UInt(v).into());
    }
    match raw.parse::<f64>() {
        Ok(v) if !v.is_nan() => Ok(Number::Float(v).into()),
        _ => Err(Error::parse(format!("invalid number '{raw}'"))),
    }
}

fn parse_date(raw: &str) -> Result<FieldValue> {
    date::parse_date(raw)
        .map(FieldValue::Date)
        .ok_or_else(|| Error::parse(format!("invalid date '{}'", raw.trim())))
}
