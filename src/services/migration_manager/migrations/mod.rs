// Migrations - 所有迁移实现
//
// 每个迁移定义目标版本号，按版本号顺序执行

mod uploader_profiles;

pub use uploader_profiles::UploaderProfileMigration;
