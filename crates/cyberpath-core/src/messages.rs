//! User-facing strings in both languages. Everything the terminal shows goes
//! through here, keyed by the active language preference.

use crate::prefs::{Language, Theme};

#[must_use]
pub fn empty_task_text(language: Language) -> &'static str {
    match language {
        Language::En => "Task text cannot be empty.",
        Language::Ar => "لا يمكن أن يكون نص المهمة فارغاً.",
    }
}

#[must_use]
pub fn task_added(language: Language) -> &'static str {
    match language {
        Language::En => "Task added.",
        Language::Ar => "تمت إضافة المهمة.",
    }
}

#[must_use]
pub fn task_deleted(language: Language) -> &'static str {
    match language {
        Language::En => "Task deleted.",
        Language::Ar => "تم حذف المهمة.",
    }
}

#[must_use]
pub fn task_updated(language: Language) -> &'static str {
    match language {
        Language::En => "Task updated.",
        Language::Ar => "تم تحديث المهمة.",
    }
}

#[must_use]
pub fn task_completed(language: Language) -> &'static str {
    match language {
        Language::En => "Task marked as completed.",
        Language::Ar => "تم وضع علامة الإكمال على المهمة.",
    }
}

#[must_use]
pub fn task_reactivated(language: Language) -> &'static str {
    match language {
        Language::En => "Task is active again.",
        Language::Ar => "أصبحت المهمة نشطة مرة أخرى.",
    }
}

#[must_use]
pub fn no_such_task(language: Language, id: u64) -> String {
    match language {
        Language::En => format!("No task with id {id}."),
        Language::Ar => format!("لا توجد مهمة بالمعرف {id}."),
    }
}

#[must_use]
pub fn nothing_to_clear(language: Language) -> &'static str {
    match language {
        Language::En => "No completed tasks to clear.",
        Language::Ar => "لا توجد مهام مكتملة للمسح.",
    }
}

#[must_use]
pub fn cleared_completed(language: Language, count: usize) -> String {
    match language {
        Language::En => format!("Cleared {count} completed task(s)."),
        Language::Ar => format!("تم مسح {count} من المهام المكتملة."),
    }
}

#[must_use]
pub fn confirm_clear(language: Language, count: usize) -> String {
    match language {
        Language::En => format!("Clear {count} completed task(s)? (y/n) "),
        Language::Ar => format!("هل تريد مسح {count} من المهام المكتملة؟ (y/n) "),
    }
}

#[must_use]
pub fn empty_list(language: Language) -> &'static str {
    match language {
        Language::En => "No tasks yet. Add one with: cyberpath add <category> <text>",
        Language::Ar => "لا توجد مهام بعد. أضف واحدة بالأمر: cyberpath add <category> <text>",
    }
}

#[must_use]
pub fn path_not_found(language: Language, key: &str) -> String {
    match language {
        Language::En => format!("Path not found: {key}"),
        Language::Ar => format!("المسار غير موجود: {key}"),
    }
}

#[must_use]
pub fn subscribe_thanks(language: Language) -> &'static str {
    match language {
        Language::En => "Thank you for subscribing! You will receive updates soon.",
        Language::Ar => "شكراً لك على الاشتراك! ستتلقى التحديثات قريباً.",
    }
}

#[must_use]
pub fn empty_email(language: Language) -> &'static str {
    match language {
        Language::En => "Email cannot be empty.",
        Language::Ar => "لا يمكن أن يكون البريد الإلكتروني فارغاً.",
    }
}

/// Printed after a language toggle, in the newly active language. The tail
/// names the other language, like the original toggle button did.
#[must_use]
pub fn language_switched(language: Language) -> &'static str {
    match language {
        Language::En => "Language: English (toggle again for العربية)",
        Language::Ar => "اللغة: العربية (English للتبديل مرة أخرى)",
    }
}

#[must_use]
pub fn theme_switched(language: Language, theme: Theme) -> &'static str {
    match (language, theme) {
        (Language::En, Theme::Light) => "Theme: light",
        (Language::En, Theme::Dark) => "Theme: dark",
        (Language::Ar, Theme::Light) => "المظهر: فاتح",
        (Language::Ar, Theme::Dark) => "المظهر: داكن",
    }
}

#[must_use]
pub fn table_headers(language: Language) -> [&'static str; 5] {
    match language {
        Language::En => ["ID", "Done", "Category", "Age", "Task"],
        Language::Ar => ["المعرف", "الحالة", "الفئة", "العمر", "المهمة"],
    }
}

#[must_use]
pub fn heading_skills(language: Language) -> &'static str {
    match language {
        Language::En => "Required Skills",
        Language::Ar => "المهارات المطلوبة",
    }
}

#[must_use]
pub fn heading_certifications(language: Language) -> &'static str {
    match language {
        Language::En => "Recommended Certifications",
        Language::Ar => "الشهادات الموصى بها",
    }
}

#[must_use]
pub fn heading_tools(language: Language) -> &'static str {
    match language {
        Language::En => "Essential Tools",
        Language::Ar => "الأدوات الأساسية",
    }
}

#[must_use]
pub fn heading_learning_path(language: Language) -> &'static str {
    match language {
        Language::En => "Learning Path",
        Language::Ar => "مسار التعلم",
    }
}

#[must_use]
pub fn heading_paths(language: Language) -> &'static str {
    match language {
        Language::En => "Career Paths",
        Language::Ar => "المسارات المهنية",
    }
}

#[must_use]
pub fn age_today(language: Language) -> &'static str {
    match language {
        Language::En => "Today",
        Language::Ar => "اليوم",
    }
}

#[must_use]
pub fn age_yesterday(language: Language) -> &'static str {
    match language {
        Language::En => "Yesterday",
        Language::Ar => "أمس",
    }
}

#[must_use]
pub fn age_days_ago(language: Language, days: i64) -> String {
    match language {
        Language::En => format!("{days} days ago"),
        // Arabic dual form for exactly two days.
        Language::Ar if days == 2 => "منذ يومين".to_string(),
        Language::Ar => format!("منذ {days} أيام"),
    }
}

#[must_use]
pub fn help(language: Language) -> &'static str {
    match language {
        Language::En => {
            "usage: cyberpath [options] [filter terms] <command> [args]\n\
             \n\
             commands:\n\
             \x20 add <category> <text>   add a study task\n\
             \x20 list [terms]            show the task list (default)\n\
             \x20 toggle <id>             flip a task between active and completed\n\
             \x20 edit <id> <text>        replace a task's text\n\
             \x20 delete <id>             remove a task\n\
             \x20 clear                   remove all completed tasks\n\
             \x20 path <key>              show a career path in detail\n\
             \x20 paths                   list all career paths\n\
             \x20 language                toggle English / Arabic\n\
             \x20 theme                   toggle light / dark colors\n\
             \x20 subscribe <email>       subscribe to the newsletter\n\
             \n\
             categories: pentest, analysis, incident, forensics, governance, cloud, iot, malware"
        }
        Language::Ar => {
            "الاستخدام: cyberpath [options] [filter terms] <command> [args]\n\
             \n\
             الأوامر:\n\
             \x20 add <category> <text>   إضافة مهمة دراسية\n\
             \x20 list [terms]            عرض قائمة المهام (الافتراضي)\n\
             \x20 toggle <id>             تبديل المهمة بين نشطة ومكتملة\n\
             \x20 edit <id> <text>        استبدال نص المهمة\n\
             \x20 delete <id>             حذف مهمة\n\
             \x20 clear                   حذف جميع المهام المكتملة\n\
             \x20 path <key>              عرض مسار مهني بالتفصيل\n\
             \x20 paths                   عرض جميع المسارات المهنية\n\
             \x20 language                التبديل بين الإنجليزية والعربية\n\
             \x20 theme                   التبديل بين الألوان الفاتحة والداكنة\n\
             \x20 subscribe <email>       الاشتراك في النشرة البريدية\n\
             \n\
             الفئات: pentest, analysis, incident, forensics, governance, cloud, iot, malware"
        }
    }
}
