//! 学生表单模型与客户端校验
//!
//! 表单字段全部以字符串保存（与输入框一致），校验通过后才转换为
//! 后端需要的 [`StudentPayload`]。

use rollbook_shared::{
    ADDRESS_LEN, AGE_RANGE, DESCRIPTION_MAX_LEN, NAME_LEN, Role, StudentPayload, StudentRecord,
    level_to_grade,
};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());
static GRADE_LEVEL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[1-9]$|^1[0-2]$").ok());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

fn is_valid_grade_level(level: &str) -> bool {
    GRADE_LEVEL_RE.as_ref().is_some_and(|re| re.is_match(level))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    GradeLevel,
    Description,
    Age,
    Address,
    Role,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::GradeLevel => "grade_level",
            Field::Description => "description",
            Field::Age => "age",
            Field::Address => "address",
            Field::Role => "role",
        }
    }
}

/// 每个字段最多一条错误信息
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub grade_level: String,
    pub description: String,
    pub age: String,
    pub address: String,
    pub role: String,
}

impl Default for StudentForm {
    /// 新建模式的初始值
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            grade_level: "1".to_string(),
            description: String::new(),
            age: AGE_RANGE.0.to_string(),
            address: String::new(),
            role: Role::Student.as_str().to_string(),
        }
    }
}

impl StudentForm {
    /// 编辑模式：把服务端记录转换为表单值（`grade` → `grade_level` 字符串）
    pub fn from_record(record: &StudentRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            grade_level: record.form_grade_level(),
            description: record.description.clone().unwrap_or_default(),
            age: record.age.to_string(),
            address: record.address.clone(),
            role: record.role.as_str().to_string(),
        }
    }

    /// 校验并转换为请求体
    pub fn validate(&self) -> Result<StudentPayload, FieldErrors> {
        let mut errors = FieldErrors::default();

        check_length(&mut errors, Field::Name, &self.name, NAME_LEN);

        if self.email.is_empty() {
            errors.insert(Field::Email, "Required");
        } else if !is_valid_email(&self.email) {
            errors.insert(Field::Email, "Invalid email address");
        }

        let grade = if self.grade_level.is_empty() {
            errors.insert(Field::GradeLevel, "Required");
            None
        } else if !is_valid_grade_level(&self.grade_level) {
            errors.insert(Field::GradeLevel, "Must be a number between 1-12");
            None
        } else {
            level_to_grade(&self.grade_level)
        };

        if self.description.chars().count() > DESCRIPTION_MAX_LEN {
            errors.insert(
                Field::Description,
                format!("Must be {} characters or less", DESCRIPTION_MAX_LEN),
            );
        }

        let age = if self.age.trim().is_empty() {
            errors.insert(Field::Age, "Required");
            None
        } else {
            // 先按数值解析再判范围，负数与超大值报范围错误而不是格式错误
            match self.age.trim().parse::<f64>() {
                Ok(age) if !age.is_finite() => {
                    errors.insert(Field::Age, "Must be a number");
                    None
                }
                Ok(age) if age < f64::from(AGE_RANGE.0) => {
                    errors.insert(Field::Age, format!("Must be at least {}", AGE_RANGE.0));
                    None
                }
                Ok(age) if age > f64::from(AGE_RANGE.1) => {
                    errors.insert(Field::Age, format!("Must be less than {}", AGE_RANGE.1 + 1));
                    None
                }
                Ok(age) if age.fract() != 0.0 => {
                    errors.insert(Field::Age, "Must be a whole number");
                    None
                }
                Ok(age) => Some(age as u32),
                Err(_) => {
                    errors.insert(Field::Age, "Must be a number");
                    None
                }
            }
        };

        check_length(&mut errors, Field::Address, &self.address, ADDRESS_LEN);

        if self.role.is_empty() {
            errors.insert(Field::Role, "Required");
        } else if Role::parse(&self.role).is_none() {
            errors.insert(Field::Role, "Invalid role");
        }

        match (grade, age) {
            (Some(grade), Some(age)) if errors.is_empty() => Ok(StudentPayload {
                name: self.name.clone(),
                email: self.email.clone(),
                grade,
                age,
                address: self.address.clone(),
                description: self.description.clone(),
            }),
            _ => Err(errors),
        }
    }
}

fn check_length(errors: &mut FieldErrors, field: Field, value: &str, (min, max): (usize, usize)) {
    let len = value.chars().count();
    if len == 0 {
        errors.insert(field, "Required");
    } else if len < min {
        errors.insert(field, format!("Must be at least {} characters", min));
    } else if len > max {
        errors.insert(field, format!("Must be {} characters or less", max));
    }
}
