mod test_offer_answer_flow;
