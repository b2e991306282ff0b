pub mod question_list;
