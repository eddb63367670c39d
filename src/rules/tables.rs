//! Static school rule and fact tables.
#![allow(dead_code)]
//!
//! Easy to update: edit the entries here and OMNIS picks them up on the next
//! start. Rules are matched by the resolver in table order, so keep related
//! entries grouped.

use chrono::Local;

/// A question pattern with its canned answer.
#[derive(Clone, Debug)]
pub struct Rule {
    pub pattern: String,
    pub answer: String,
}

impl Rule {
    pub fn new(pattern: &str, answer: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            answer: answer.to_string(),
        }
    }
}

/// Answer payload of a legacy fact. Older table dumps stored some answers as
/// lists; only the first element of a list is usable.
#[derive(Clone, Debug)]
pub enum FactAnswer {
    Text(String),
    Variants(Vec<String>),
}

impl FactAnswer {
    /// The usable answer string, if any.
    pub fn primary(&self) -> Option<&str> {
        match self {
            FactAnswer::Text(s) => Some(s),
            FactAnswer::Variants(v) => v.first().map(String::as_str),
        }
    }
}

/// A legacy keyword-scored fact record.
#[derive(Clone, Debug)]
pub struct LegacyFact {
    pub keywords: Vec<String>,
    pub answer: FactAnswer,
}

impl LegacyFact {
    pub fn new(keywords: &[&str], answer: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            answer: FactAnswer::Text(answer.to_string()),
        }
    }
}

/// The custom Q&A rule table.
pub fn rule_table() -> Vec<Rule> {
    vec![
        // Attendance & time rules
        Rule::new(
            "What is the assembly time?",
            "Daily morning assembly is at 8:45 AM sharp.",
        ),
        Rule::new(
            "When am I marked late?",
            "Students arriving after 8:30 AM are marked as late.",
        ),
        Rule::new(
            "What is the attendance requirement?",
            "You need minimum 95% attendance to continue in school.",
        ),
        Rule::new(
            "What happens if I'm absent?",
            "Your parents will be notified within 2 hours of your absence.",
        ),
        // Uniform rules
        Rule::new(
            "What is the dress code?",
            "Full school uniform is compulsory Monday to Friday. Uniform includes shirt/blouse, tie, trousers/skirt, and black leather shoes.",
        ),
        Rule::new(
            "When can I wear PE uniform?",
            "PE uniform is only worn on designated sports days as per the timetable.",
        ),
        Rule::new(
            "What about formal events?",
            "Formal attire must be worn for assemblies, ceremonies, and special events.",
        ),
        Rule::new(
            "What shoes should I wear?",
            "Only black leather shoes are permitted. No colored or casual shoes.",
        ),
        // Mobile phone & conduct rules
        Rule::new(
            "Can I bring my mobile phone to school?",
            "No, mobile phones are not permitted during school hours. Any phones found will be confiscated and returned to parents.",
        ),
        Rule::new(
            "What is the bullying policy?",
            "MGM has a zero-tolerance policy on bullying. Any bullying will result in immediate disciplinary action.",
        ),
        Rule::new(
            "What language should I speak in class?",
            "Only English or Malayalam is permitted in class. No other languages.",
        ),
        Rule::new(
            "How should I behave?",
            "Always show respectful conduct towards all staff and peers. Use polite language and follow instructions.",
        ),
        // Late & leave procedures
        Rule::new(
            "What should I do if I'm late for school?",
            "Report to the main office with a note from your parent. You will be marked as late in your record.",
        ),
        Rule::new(
            "How do I request leave?",
            "Submit a leave form to your class teacher at least 3 days in advance. Medical certificates are required for sick leave longer than 2 days.",
        ),
        Rule::new(
            "What is the emergency leave process?",
            "For emergency situations, call the school office immediately. Parent notification is compulsory within the same day.",
        ),
        // Fee payment rules
        Rule::new(
            "When are fees due?",
            "School fees must be paid by the 5th of each month.",
        ),
        Rule::new(
            "What if I pay late?",
            "Late payment will incur a 5% late charge. Please pay on time to avoid penalties.",
        ),
        Rule::new(
            "How do I pay fees?",
            "Fees can be paid via online bank transfer or cheque. Always request a receipt for your records.",
        ),
        // Safety & laboratory rules
        Rule::new(
            "What are the laboratory safety rules?",
            "Lab access is only permitted with teacher supervision. Always wear safety goggles and follow all instructions exactly.",
        ),
        Rule::new(
            "What if I don't follow lab rules?",
            "Non-compliance with lab safety rules will result in suspension from lab access and disciplinary action.",
        ),
        Rule::new(
            "What medical facilities are available?",
            "A qualified school nurse is available 8 AM to 4 PM daily. Report any injuries or health issues immediately.",
        ),
        // Bullying & discipline
        Rule::new(
            "What should I do if I'm being bullied?",
            "Report immediately to any teacher, counselor, or the principal. All complaints will be investigated and appropriate action taken.",
        ),
        Rule::new(
            "What is the grievance procedure?",
            "First speak to your class teacher. If unresolved, contact the administrator. For formal complaints, submit a written request to the principal.",
        ),
        Rule::new(
            "How long does grievance resolution take?",
            "The Grievance Redressal Committee reviews all complaints and aims to resolve within 30 days.",
        ),
        // Library & study facilities
        Rule::new(
            "What are the library hours?",
            "The library is open from 8:00 AM to 4:00 PM on all school days.",
        ),
        Rule::new(
            "How long can I keep books?",
            "Books can be issued for 2 weeks. You can renew if no one else has requested the book.",
        ),
        Rule::new(
            "Are there digital resources?",
            "Yes, we have three digital libraries with e-books and online resources available to all students.",
        ),
        // Sports & activities
        Rule::new(
            "Do I have to participate in sports?",
            "Yes, all students must participate in at least one sport or physical activity per week.",
        ),
        Rule::new(
            "What sports facilities are available?",
            "We have a basketball court, volleyball court, badminton facilities, and sports equipment for various activities.",
        ),
        Rule::new(
            "Are there extracurricular activities?",
            "Yes, students can join various clubs including debate, music, arts, STEM, and community service.",
        ),
        // Canteen & food
        Rule::new(
            "What is the canteen policy?",
            "Only healthy food is served in the canteen. Junk food is strictly prohibited.",
        ),
        Rule::new(
            "Are there special meals for allergies?",
            "Yes, please inform the canteen manager and principal of any food allergies for special arrangements.",
        ),
        // Contact & administration
        Rule::new(
            "Who is the principal?",
            "Dr Pooja S is our principal. Office hours are 8:30 AM to 4:00 PM.",
        ),
        Rule::new(
            "How do I contact the school?",
            "Call the main office or visit the school during office hours. Email queries can be sent to the school website.",
        ),
        Rule::new(
            "Is there a school counselor?",
            "Yes, a qualified counselor is available for student support, academic guidance, and personal counseling.",
        ),
    ]
}

/// The legacy keyword-scored fact table. Clock-derived answers are rendered
/// when the table is built, matching the original robot's behavior.
pub fn legacy_facts() -> Vec<LegacyFact> {
    let now = Local::now();

    vec![
        LegacyFact::new(&["old", "mgm"], "Our school is forty years old"),
        LegacyFact::new(&["my", "name", "is"], "Welcome to MGM Model School Robot"),
        LegacyFact::new(&["your", "name"], "I am MGM Robot. How are you?"),
        LegacyFact::new(
            &["what", "time"],
            &now.format("%M minutes past %I%p").to_string(),
        ),
        LegacyFact::new(
            &["what", "date", "today"],
            &now.format("Today is %B %d %Y").to_string(),
        ),
        LegacyFact::new(&["thank", "you"], "You are welcome!"),
        LegacyFact::new(&["who", "founder", "mgm"], "Dr P K Sukumaran"),
        LegacyFact::new(&["who", "founded", "mgm"], "Dr P K Sukumaran"),
        LegacyFact::new(
            &["foundation", "stone", "laid"],
            "Nitya Haritha Nayakan Mister Prem Nasir",
        ),
        LegacyFact::new(&["our", "principal"], "Dr Pooja S"),
        LegacyFact::new(&["who", "first", "principal", "of", "mgm"], "Ms Lalitha"),
        LegacyFact::new(
            &["many", "digital", "library", "libraries"],
            "We have three digital libraries",
        ),
        LegacyFact::new(
            &["Name", "President", "visit", "mgm"],
            "Dr A P J Abdul Kalam",
        ),
        LegacyFact::new(
            &["what", "vision", "our", "school"],
            "To develop global citizens, with Indian values, capable of transforming every Indian to lead a generous, empathetic and fulfilled life",
        ),
        LegacyFact::new(
            &["many", "students", "do", "have"],
            "Two thousand nine hundred",
        ),
        LegacyFact::new(
            &["mgm", "mgm model school", "start", "started", "year", "which"],
            "Nineteen eighty three",
        ),
        LegacyFact::new(
            &["which", "sister", "sister concern", "school", "mgm"],
            "KPM model school, Mayyanad",
        ),
        LegacyFact::new(
            &["how", "many", "students", "there", "mgm", "begining"],
            "We started with five students",
        ),
        LegacyFact::new(
            &["which", "novel", "method", "teaching", "introduced", "mgm"],
            "Twenty twenty",
        ),
        LegacyFact::new(
            &["what", "going", "celebrated", "celebration", "year", "20", "23", "24"],
            "Ruby Jubilee",
        ),
        LegacyFact::new(
            &["who", "inagurated", "innovation", "center"],
            "Honourable Governer Shri Arif Mohammed Khan",
        ),
        LegacyFact::new(
            &["which", "chief", "minister", "visit", "mgm"],
            "Shri Oommen Chandy",
        ),
        LegacyFact::new(&["tagline", "mgm", "tag", "line", "what"], "Satyameya Jayate"),
        LegacyFact::new(
            &["how", "many", "employees", "have"],
            "We have two hundred and fifty employees",
        ),
        LegacyFact::new(
            &["what", "facilities", "infrastructure", "provided", "mgm"],
            "Digital library, Maths 3d corner, Maths innovation center, Globe, Basket ball court, Butterfly garden, and one yoga period for class one to eighth",
        ),
    ]
}
