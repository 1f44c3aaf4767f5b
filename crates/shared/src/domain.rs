use std::fmt;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(pub i64);

        /// Accepts a number or a numeric string.
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = Value::deserialize(deserializer)?;
                de::id_from_value(&value)
                    .map(Self)
                    .ok_or_else(|| D::Error::custom(format!("invalid id {value}")))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(StudentId);
id_newtype!(InstructorId);
id_newtype!(CourseId);
id_newtype!(LessonId);
id_newtype!(RecitationId);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Student {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "de::or_default")]
    pub id: Option<StudentId>,
    #[serde(deserialize_with = "de::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub email: String,
    #[serde(skip_serializing, deserialize_with = "de::null_as_default")]
    pub password: String,
    #[serde(skip_serializing, deserialize_with = "de::null_as_default")]
    pub password_confirmation: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub certificate: String,
    pub student_img: Option<String>,
    #[serde(deserialize_with = "de::null_as_default")]
    pub birth_date: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub enroll_date: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub notes: String,
    #[serde(deserialize_with = "de::string_list")]
    pub quran_memorized_parts: Vec<String>,
    #[serde(deserialize_with = "de::string_list")]
    pub quran_passed_parts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instructor {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "de::or_default")]
    pub id: Option<InstructorId>,
    #[serde(deserialize_with = "de::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub email: String,
    #[serde(skip_serializing, deserialize_with = "de::null_as_default")]
    pub password: String,
    #[serde(skip_serializing, deserialize_with = "de::null_as_default")]
    pub password_confirmation: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub certificate: String,
    pub instructor_img: Option<String>,
    #[serde(deserialize_with = "de::null_as_default")]
    pub birth_date: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "de::string_list")]
    pub religious_qualifications: Vec<String>,
    #[serde(deserialize_with = "de::string_list")]
    pub quran_memorized_parts: Vec<String>,
    #[serde(deserialize_with = "de::string_list")]
    pub quran_passed_parts: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseType {
    #[default]
    TahfeezCourse,
    Other,
}

impl CourseType {
    pub const ALL: [CourseType; 2] = [CourseType::TahfeezCourse, CourseType::Other];

    pub fn label(self) -> &'static str {
        match self {
            CourseType::TahfeezCourse => "Tahfeez Course",
            CourseType::Other => "Other",
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            CourseType::TahfeezCourse => "TahfeezCourse",
            CourseType::Other => "Other",
        }
    }
}

/// A course as returned by the API.
///
/// The server embeds enrolled people either as id lists or as full objects;
/// both forms collapse to id lists here. Instructors arrive under the singular
/// `instructor` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "de::or_default")]
    pub id: Option<CourseId>,
    #[serde(rename = "type", deserialize_with = "de::or_default")]
    pub kind: CourseType,
    #[serde(deserialize_with = "de::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub expected_end_date: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub course_start_time: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub level: String,
    #[serde(deserialize_with = "de::null_as_default")]
    pub file_name: String,
    pub image: Option<String>,
    pub file_path: Option<String>,
    #[serde(deserialize_with = "de::id_list")]
    pub students: Vec<StudentId>,
    #[serde(rename = "instructor", alias = "instructors", deserialize_with = "de::id_list")]
    pub instructors: Vec<InstructorId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evaluation {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Evaluation {
    pub const ALL: [Evaluation; 4] = [
        Evaluation::Excellent,
        Evaluation::Good,
        Evaluation::Fair,
        Evaluation::Poor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Evaluation::Excellent => "Excellent",
            Evaluation::Good => "Good",
            Evaluation::Fair => "Fair",
            Evaluation::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recitation {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "de::or_default")]
    pub id: Option<RecitationId>,
    #[serde(deserialize_with = "de::or_default")]
    pub student_id: Option<StudentId>,
    #[serde(deserialize_with = "de::or_default")]
    pub course_id: Option<CourseId>,
    #[serde(deserialize_with = "de::or_default")]
    pub lesson_id: Option<LessonId>,
    #[serde(deserialize_with = "de::number_list")]
    pub recitation_per_page: Vec<u32>,
    #[serde(deserialize_with = "de::or_default")]
    pub recitation_evaluation: Option<Evaluation>,
    #[serde(deserialize_with = "de::one_based")]
    pub current_juz: u32,
    #[serde(deserialize_with = "de::one_based")]
    pub current_juz_page: u32,
}

impl Default for Recitation {
    fn default() -> Self {
        Self {
            id: None,
            student_id: None,
            course_id: None,
            lesson_id: None,
            recitation_per_page: Vec::new(),
            recitation_evaluation: None,
            current_juz: 1,
            current_juz_page: 1,
        }
    }
}

/// Lookup-only record; lessons are never edited from the admin screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lesson {
    #[serde(deserialize_with = "de::or_default")]
    pub id: Option<LessonId>,
    #[serde(deserialize_with = "de::null_as_default")]
    pub lesson_title: String,
}

/// Lenient deserializers for the shapes the API actually emits.
pub mod de {
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};
    use serde_json::Value;

    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Any value that does not decode as `T` (null, an unknown enum name, a
    /// malformed id) becomes `T::default()`.
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// A juz or page number given as a number or numeric string. Anything
    /// else falls back to 1.
    pub fn one_based<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(id_from_value(&value)
            .and_then(|number| u32::try_from(number).ok())
            .filter(|number| *number >= 1)
            .unwrap_or(1))
    }

    /// Accepts an array of strings/numbers, a JSON-encoded array inside a
    /// string, a comma separated string, or null.
    pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(strings_from_value(value))
    }

    fn strings_from_value(value: Value) -> Vec<String> {
        match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items.into_iter().filter_map(scalar_to_string).collect(),
            Value::String(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Vec::new();
                }
                match serde_json::from_str::<Value>(trimmed) {
                    Ok(parsed @ Value::Array(_)) => strings_from_value(parsed),
                    _ => trimmed
                        .split(',')
                        .map(str::trim)
                        .filter(|part| !part.is_empty())
                        .map(str::to_string)
                        .collect(),
                }
            }
            other => scalar_to_string(other).into_iter().collect(),
        }
    }

    fn scalar_to_string(value: Value) -> Option<String> {
        match value {
            Value::String(text) => Some(text),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    pub fn number_list<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(strings_from_value(value)
            .into_iter()
            .filter_map(|text| text.parse().ok())
            .collect())
    }

    /// Accepts ids as numbers, numeric strings, or objects carrying an `id`.
    pub fn id_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: From<i64>,
    {
        let value = Value::deserialize(deserializer)?;
        let Value::Array(items) = value else {
            return Ok(Vec::new());
        };
        Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => map.get("id").and_then(id_from_value),
                other => id_from_value(&other),
            })
            .map(T::from)
            .collect())
    }

    pub(crate) fn id_from_value(value: &Value) -> Option<i64> {
        match value {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
