use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Word, Words};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::{Dummy, Fake, Faker};
use serde_json::{Value, json};

// Test fixtures for creating sample request bodies

#[derive(Debug, Clone, Dummy)]
pub struct ContactFixture {
    #[dummy(faker = "Name()")]
    pub name: String,
    #[dummy(faker = "SafeEmail()")]
    pub email: String,
    #[dummy(faker = "PhoneNumber()")]
    pub phone: String,
    #[dummy(faker = "CompanyName()")]
    pub company: String,
}

impl Default for ContactFixture {
    fn default() -> Self {
        Faker.fake()
    }
}

impl ContactFixture {
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "phone": self.phone,
            "company": self.company,
        })
    }
}

#[derive(Debug, Clone)]
pub struct FunnelFixture {
    pub name: String,
    pub domain: String,
}

impl Default for FunnelFixture {
    fn default() -> Self {
        let words: Vec<String> = Words(2..4).fake();
        Self {
            name: format!("{} funnel", words.join(" ")),
            domain: format!("{}.example.com", Word().fake::<String>()),
        }
    }
}

impl FunnelFixture {
    pub fn to_json(&self) -> Value {
        json!({"name": self.name, "domain": self.domain})
    }
}

pub fn workflow_name() -> String {
    let words: Vec<String> = Words(2..5).fake();
    format!("{} workflow", words.join(" "))
}

pub fn appointment_json(title: &str, start: &str, end: &str) -> Value {
    json!({
        "title": title,
        "date": "2024-06-03",
        "startTime": start,
        "endTime": end,
    })
}
