#![allow(dead_code)]

use chrono::{DateTime, Utc};
use findit::{Member, Record, RecordSchema, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    pub name: String,
    pub age: u32,
}

impl Record for Pet {
    fn schema() -> RecordSchema {
        RecordSchema::new()
            .member(Member::text("name"))
            .member(Member::number("age"))
    }

    fn member_value(&self, member: &str) -> Value<'_> {
        match member {
            "name" => Value::scalar(self.name.as_str()),
            "age" => Value::scalar(self.age),
            _ => Value::Missing,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i64,
    pub score: f64,
    pub active: bool,
    pub joined: DateTime<Utc>,
    pub bio: String,
    pub tags: Vec<String>,
    pub address: Address,
    pub pets: Vec<Pet>,
    pub password: String,
}

impl Person {
    pub fn new(name: &str, age: i64) -> Self {
        Person {
            name: name.to_string(),
            age,
            score: 0.5,
            active: true,
            joined: DateTime::from_timestamp(1_600_000_000, 0).unwrap_or_default(),
            bio: String::new(),
            tags: Vec::new(),
            address: Address { city: "nowhere".to_string() },
            pets: Vec::new(),
            password: "hunter2".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub city: String,
}

impl Record for Address {
    fn schema() -> RecordSchema {
        RecordSchema::new().member(Member::text("city"))
    }

    fn member_value(&self, member: &str) -> Value<'_> {
        match member {
            "city" => Value::scalar(self.city.as_str()),
            _ => Value::Missing,
        }
    }
}

impl Record for Person {
    fn schema() -> RecordSchema {
        RecordSchema::new()
            .member(Member::partial("name"))
            .member(Member::number("age"))
            .member(Member::number("score"))
            .member(Member::boolean("active"))
            .member(Member::date("joined"))
            .member(Member::words("bio").config("analyzer", "standard"))
            .member(Member::partial("tags").list())
            .member(Member::nested::<Address>("address"))
            .member(Member::nested_list::<Pet>("pets"))
            .member(Member::text("password").skip())
    }

    fn member_value(&self, member: &str) -> Value<'_> {
        match member {
            "name" => Value::scalar(self.name.as_str()),
            "age" => Value::scalar(self.age),
            "score" => Value::scalar(self.score),
            "active" => Value::scalar(self.active),
            "joined" => Value::scalar(self.joined),
            "bio" => Value::scalar(self.bio.as_str()),
            "tags" => Value::list(&self.tags),
            "address" => Value::record(&self.address),
            "pets" => Value::records(&self.pets),
            _ => Value::Missing,
        }
    }
}
