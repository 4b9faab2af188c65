/// Complete findit API Demo
///
/// Demonstrates the main index operations:
/// - Describing a record type
/// - put / get / remove / random
/// - Match, partial and range search with sorting and paging
/// - URL query strings and JSON queries

use chrono::{TimeZone, Utc};
use findit::{parse_json_query, parse_query_string, Index, Member, Record, RecordSchema, SearchQuery, Value};

struct Pet {
    name: String,
}

impl Record for Pet {
    fn schema() -> RecordSchema {
        RecordSchema::new().member(Member::text("name"))
    }

    fn member_value(&self, member: &str) -> Value<'_> {
        match member {
            "name" => Value::scalar(self.name.as_str()),
            _ => Value::Missing,
        }
    }
}

struct User {
    name: String,
    age: u32,
    email: String,
    joined: chrono::DateTime<Utc>,
    bio: String,
    pets: Vec<Pet>,
}

impl Record for User {
    fn schema() -> RecordSchema {
        RecordSchema::new()
            .member(Member::partial("name"))
            .member(Member::number("age"))
            .member(Member::text("email").skip())
            .member(Member::date("joined"))
            .member(Member::words("bio").config("analyzer", "standard"))
            .member(Member::nested_list::<Pet>("pets"))
    }

    fn member_value(&self, member: &str) -> Value<'_> {
        match member {
            "name" => Value::scalar(self.name.as_str()),
            "age" => Value::scalar(self.age),
            "email" => Value::scalar(self.email.as_str()),
            "joined" => Value::scalar(self.joined),
            "bio" => Value::scalar(self.bio.as_str()),
            "pets" => Value::records(&self.pets),
            _ => Value::Missing,
        }
    }
}

fn user(name: &str, age: u32, year: i32, bio: &str, pets: &[&str]) -> User {
    User {
        name: name.to_string(),
        age,
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        joined: Utc.with_ymd_and_hms(year, 6, 1, 12, 0, 0).single().unwrap_or_default(),
        bio: bio.to_string(),
        pets: pets.iter().map(|name| Pet { name: name.to_string() }).collect(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n╔═══════════════════════════════════════════════╗");
    println!("║        findit Index - Complete API Demo       ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // Step 1: Create index
    println!("Step 1: Creating index...");
    let index = Index::<User>::new()?;
    for descriptor in index.schema().descriptors() {
        println!("  field {:<12} {:?}", descriptor.name, descriptor.kind);
    }
    println!("Done!\n");

    // Step 2: PUT
    println!("Step 2: PUT - Adding records...");
    index.put("u1", user("Billy Bob", 25, 2019, "Runs marathons and bakes bread", &["Rex"]))?;
    index.put("u2", user("Billie Jean", 31, 2021, "Dancing is my running", &["Tom", "Jerry"]))?;
    index.put("u3", user("Ann Smith", 45, 2018, "Quiet reader of old novels", &[]))?;
    index.put("u4", user("Bill Gates", 67, 2020, "Reads many books", &["Rex"]))?;
    println!("  {} records indexed", index.len());
    if let Err(err) = index.put("u1", user("Impostor", 1, 2000, "", &[])) {
        println!("  duplicate put rejected: {err}");
    }
    println!();

    // Step 3: GET / RANDOM
    println!("Step 3: GET - Reading records...");
    println!("  u3 -> {}", index.get("u3")?.name);
    if let Some((id, record)) = index.random() {
        println!("  random -> {id} ({})", record.name);
    }
    println!();

    // Step 4: SEARCH
    println!("Step 4: SEARCH - Querying...");
    let query = SearchQuery::new()
        .partial("name", "bill")
        .range("age", 18, 40)
        .sort_by("age")
        .desc();
    for hit in index.search(&query)? {
        println!("  partial+range: {} ({})", hit.name, hit.age);
    }

    for hit in index.search(&SearchQuery::new().field("pets[0].name", "rex"))? {
        println!("  first pet is Rex: {}", hit.name);
    }

    for hit in index.search(&SearchQuery::new().field("bio", "run"))? {
        println!("  bio mentions running: {}", hit.name);
    }

    let since = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).single().unwrap_or_default();
    let results = index.search_results(&SearchQuery::new().range("joined", since, 0).limit(1))?;
    println!("  joined since 2019: {} total, showing {} ({} ms)", results.total_hits, results.len(), results.took_ms);
    println!();

    // Step 5: QUERY STRINGS
    println!("Step 5: QUERY STRINGS - Parsing...");
    let parsed = parse_query_string("name=partial:bil&age=20,70&sort=asc&sort_by=age", index.schema())?;
    for hit in index.search(&parsed)? {
        println!("  url query: {} ({})", hit.name, hit.age);
    }
    let parsed = parse_json_query(br#"{"fields":[{"field":"age","type":"range","value":[40,0]}]}"#)?;
    for hit in index.search(&parsed)? {
        println!("  json query: {} ({})", hit.name, hit.age);
    }
    println!();

    // Step 6: REMOVE
    println!("Step 6: REMOVE - Deleting records...");
    let removed = index.remove("u4")?;
    println!("  removed {}; {} records left", removed.name, index.len());
    if let Err(err) = index.get("u4") {
        println!("  lookup after remove: {err}");
    }

    println!("\n✓ Demo finished");
    Ok(())
}
