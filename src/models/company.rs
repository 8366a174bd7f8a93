//! 公司信息数据模型

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::validation::{CompanyForm, FormErrors};

/// 表单字段标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    /// 公司名称
    CompanyName,
    /// CIN 编号
    CinNumber,
    /// 检索参考号
    SearchReferenceId,
    /// 成立日期
    DateOfIncorporation,
    /// UDIN
    Udin,
    /// 注册地址
    RegisteredOffice,
}

static FIELD_NAMES: phf::Map<&'static str, FieldId> = phf_map! {
    "companyName" => FieldId::CompanyName,
    "cinNumber" => FieldId::CinNumber,
    "searchReferenceId" => FieldId::SearchReferenceId,
    "dateOfIncorporation" => FieldId::DateOfIncorporation,
    "udin" => FieldId::Udin,
    "registeredOffice" => FieldId::RegisteredOffice,
    "company_name" => FieldId::CompanyName,
    "cin_number" => FieldId::CinNumber,
    "search_reference_id" => FieldId::SearchReferenceId,
    "date_of_incorporation" => FieldId::DateOfIncorporation,
    "registered_office" => FieldId::RegisteredOffice,
};

impl FieldId {
    /// 表单字段顺序
    pub const ALL: [FieldId; 6] = [
        FieldId::CompanyName,
        FieldId::CinNumber,
        FieldId::SearchReferenceId,
        FieldId::DateOfIncorporation,
        FieldId::Udin,
        FieldId::RegisteredOffice,
    ];

    /// 接口中使用的字段名
    pub fn name(self) -> &'static str {
        match self {
            FieldId::CompanyName => "companyName",
            FieldId::CinNumber => "cinNumber",
            FieldId::SearchReferenceId => "searchReferenceId",
            FieldId::DateOfIncorporation => "dateOfIncorporation",
            FieldId::Udin => "udin",
            FieldId::RegisteredOffice => "registeredOffice",
        }
    }

    /// 界面显示名称
    pub fn label(self) -> &'static str {
        match self {
            FieldId::CompanyName => "Name of the Company",
            FieldId::CinNumber => "CIN Number",
            FieldId::SearchReferenceId => "Search Reference ID",
            FieldId::DateOfIncorporation => "Date of Incorporation",
            FieldId::Udin => "UDIN",
            FieldId::RegisteredOffice => "Registered Office",
        }
    }

    /// 从字段名解析（camelCase 或 snake_case），未知字段返回 None
    pub fn from_name(name: &str) -> Option<Self> {
        FIELD_NAMES.get(name).copied()
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 已通过校验的公司信息
///
/// 只能经由 [`CompanyForm::submit`] 或 [`CompanyMetadata::from_input`] 构造，
/// 构造后不可修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMetadata {
    company_name: String,
    cin_number: String,
    search_reference_id: String,
    date_of_incorporation: String,
    udin: String,
    registered_office: String,
}

impl CompanyMetadata {
    /// 由表单内部在全部字段校验通过后调用
    pub(crate) fn from_validated(values: impl Fn(FieldId) -> String) -> Self {
        Self {
            company_name: values(FieldId::CompanyName),
            cin_number: values(FieldId::CinNumber),
            search_reference_id: values(FieldId::SearchReferenceId),
            date_of_incorporation: values(FieldId::DateOfIncorporation),
            udin: values(FieldId::Udin),
            registered_office: values(FieldId::RegisteredOffice),
        }
    }

    /// 将原始输入逐字段经过校验引擎
    pub fn from_input(input: &CompanyDetailsInput) -> Result<Self, FormErrors> {
        let mut form = CompanyForm::new();
        for field in FieldId::ALL {
            form.input(field, input.get(field));
        }
        form.submit()
    }

    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::CompanyName => &self.company_name,
            FieldId::CinNumber => &self.cin_number,
            FieldId::SearchReferenceId => &self.search_reference_id,
            FieldId::DateOfIncorporation => &self.date_of_incorporation,
            FieldId::Udin => &self.udin,
            FieldId::RegisteredOffice => &self.registered_office,
        }
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn cin_number(&self) -> &str {
        &self.cin_number
    }
}

/// 未经校验的原始公司信息（例如从 TOML 文件读取）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyDetailsInput {
    #[serde(alias = "company_name")]
    pub company_name: String,
    #[serde(alias = "cin_number")]
    pub cin_number: String,
    #[serde(alias = "search_reference_id")]
    pub search_reference_id: String,
    #[serde(alias = "date_of_incorporation")]
    pub date_of_incorporation: String,
    pub udin: String,
    #[serde(alias = "registered_office")]
    pub registered_office: String,
}

impl CompanyDetailsInput {
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::CompanyName => &self.company_name,
            FieldId::CinNumber => &self.cin_number,
            FieldId::SearchReferenceId => &self.search_reference_id,
            FieldId::DateOfIncorporation => &self.date_of_incorporation,
            FieldId::Udin => &self.udin,
            FieldId::RegisteredOffice => &self.registered_office,
        }
    }
}
