use super::model::Stream;

pub const MALE_FIRST_NAMES: &[&str] = &[
    "Aarav", "Vivaan", "Aditya", "Vihaan", "Arjun", "Sai", "Reyansh", "Ayaan", "Krishna",
    "Ishaan", "Rohan", "Kabir", "Dhruv", "Aryan", "Kunal", "Nikhil", "Rahul", "Siddharth",
    "Yash", "Harsh",
];

pub const FEMALE_FIRST_NAMES: &[&str] = &[
    "Aadhya", "Ananya", "Diya", "Saanvi", "Pari", "Anika", "Navya", "Myra", "Sara", "Ira",
    "Kavya", "Riya", "Sneha", "Pooja", "Meera", "Isha", "Tanvi", "Nisha", "Priya", "Aditi",
];

pub const LAST_NAMES: &[&str] = &[
    "Sharma", "Verma", "Gupta", "Singh", "Kumar", "Patel", "Reddy", "Iyer", "Nair", "Joshi",
    "Mehta", "Shah", "Agarwal", "Chopra", "Malhotra", "Bansal", "Kapoor", "Desai", "Rao",
    "Mishra",
];

pub const CITIES: &[&str] = &[
    "Delhi", "Mumbai", "Bengaluru", "Pune", "Jaipur", "Lucknow", "Hyderabad", "Chennai",
];

pub const STREETS: &[&str] = &[
    "MG Road", "Park Street", "Station Road", "Nehru Nagar", "Civil Lines", "Lake View",
    "Gandhi Marg", "Rajpath Colony",
];

pub const PAYMENT_MODES: &[&str] = &["UPI", "Cash", "Card", "Net Banking", "Cheque"];

pub const TIME_SLOTS: &[&str] = &[
    "09:00 AM - 10:00 AM",
    "10:00 AM - 11:00 AM",
    "11:30 AM - 12:30 PM",
    "02:00 PM - 03:00 PM",
    "04:00 PM - 05:00 PM",
    "05:00 PM - 06:00 PM",
];

pub const ROOMS: &[&str] = &["Room 101", "Room 102", "Room 201", "Room 202", "Hall A", "Lab 1"];

const JUNIOR_SUBJECTS: &[&str] = &[
    "Mathematics",
    "Science",
    "English",
    "Social Studies",
    "Hindi",
];

const SCIENCE_SUBJECTS: &[&str] = &["Physics", "Chemistry", "Mathematics", "Biology", "English"];

const COMMERCE_SUBJECTS: &[&str] = &[
    "Accountancy",
    "Business Studies",
    "Economics",
    "Mathematics",
    "English",
];

/// Subject set for a grade band. Grades 11-12 depend on the stream and fall back
/// to science when none is given.
pub fn subjects_for(grade: u8, stream: Option<Stream>) -> Vec<String> {
    let set = if grade <= 10 {
        JUNIOR_SUBJECTS
    } else {
        match stream {
            Some(Stream::Commerce) => COMMERCE_SUBJECTS,
            _ => SCIENCE_SUBJECTS,
        }
    };
    set.iter().map(|s| s.to_string()).collect()
}

pub const CATALOG_YEAR: i32 = 2024;

/// Birth year for a student currently in `grade`: grade 6 pupils are 11 in 2024.
pub fn birth_year_for_grade(grade: u8) -> i32 {
    CATALOG_YEAR - (grade as i32 + 5)
}

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
